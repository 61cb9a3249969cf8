use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Brand {
    #[serde(rename = "brandId", deserialize_with = "super::id_string")]
    pub brand_id: String,
    #[serde(rename = "brandName")]
    pub brand_name: String,
}

/// Body of `POST dashboard/brands`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewBrand {
    #[serde(rename = "brandName")]
    pub brand_name: String,
}

/// Body of `PATCH dashboard/brands/{id}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BrandUpdate {
    pub name: String,
}
