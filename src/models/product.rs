use serde::{Deserialize, Serialize};

/// Catalog entry. Products are shared across all users.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TeaProduct {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub vendor_cost: f64,
    pub selling_price: f64,
    pub is_active: bool,
}

/// Payload for creating a catalog entry
#[derive(Debug, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub vendor_cost: f64,
    pub selling_price: f64,
}

impl NewProduct {
    /// Validate the payload: name non-empty, costs non-negative
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Product name cannot be empty.");
        }
        if self.vendor_cost < 0.0 || self.selling_price < 0.0 {
            return Err("Costs and prices cannot be negative.");
        }
        Ok(())
    }
}

/// Partial update for a catalog entry. Only supplied fields change;
/// absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub vendor_cost: Option<f64>,
    pub selling_price: Option<f64>,
    pub is_active: Option<bool>,
}

impl ProductPatch {
    /// True when no recognized field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.vendor_cost.is_none()
            && self.selling_price.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_validation() {
        let ok = NewProduct {
            name: "Sencha".to_string(),
            description: None,
            vendor_cost: 2.0,
            selling_price: 5.0,
        };
        assert!(ok.validate().is_ok());

        let blank_name = NewProduct {
            name: "   ".to_string(),
            ..ok_clone(&ok)
        };
        assert!(blank_name.validate().is_err());

        let negative_cost = NewProduct {
            vendor_cost: -1.0,
            ..ok_clone(&ok)
        };
        assert!(negative_cost.validate().is_err());
    }

    fn ok_clone(p: &NewProduct) -> NewProduct {
        NewProduct {
            name: p.name.clone(),
            description: p.description.clone(),
            vendor_cost: p.vendor_cost,
            selling_price: p.selling_price,
        }
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());

        let patch = ProductPatch {
            selling_price: Some(6.5),
            ..ProductPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_ignores_unknown_fields() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"name":"Oolong","flavor":"toasty"}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Oolong"));
        assert!(patch.description.is_none());
    }
}
