use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ProductCreateRequest {
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Manufacturer is required"))]
    pub manufacturer: String,
    #[validate(range(min = 0, max = 100, message = "Quantity must be between 0 and 100"))]
    pub quantity: i32,
}

/// Partial update: absent fields are left untouched. SKU and owner are fixed
/// at creation.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProductUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Quantity must be between 0 and 100"))]
    pub quantity: Option<i32>,
}
