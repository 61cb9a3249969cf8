use crate::model::brand::{Brand, BrandUpdate, NewBrand};
use crate::repository::BrandRepository;
use anyhow::{anyhow, Result};

pub struct BrandService<R: BrandRepository> {
    repo: R,
}

impl<R: BrandRepository> BrandService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Result<Vec<Brand>> {
        self.repo.list_brands()
    }

    pub fn create(&self, name: &str) -> Result<()> {
        let brand_name = normalize_name(name)?;
        self.repo.create_brand(&NewBrand { brand_name })
    }

    pub fn rename(&self, id: &str, name: &str) -> Result<()> {
        let name = normalize_name(name)?;
        self.repo.update_brand(id, &BrandUpdate { name })
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete_brand(id)
    }

    pub fn find(&self, id: &str) -> Result<Option<Brand>> {
        Ok(self.list()?.into_iter().find(|b| b.brand_id == id))
    }
}

fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Brand name is required"));
    }
    Ok(trimmed.to_string())
}
