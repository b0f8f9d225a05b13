//! Reference data loading from seed.toml
//!
//! Branches, departments, product types and products are the rows every other table
//! points at. This module loads them from a TOML file and inserts whatever is missing,
//! so seeding can run on every start-up.
//!
//! Dates are written as quoted ISO strings (`date_offered = "2000-01-01"`).

use crate::{
    core::{organization, product},
    entities::{Branch, Department, branch, department},
    errors::{Error, Result},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default seed file location used when `SEED_CONFIG` is not set.
pub const DEFAULT_SEED_PATH: &str = "seed.toml";

/// Configuration structure representing the entire seed.toml file
#[derive(Debug, Default, Deserialize)]
pub struct SeedConfig {
    /// Branches to create
    #[serde(default)]
    pub branches: Vec<BranchSeed>,
    /// Departments to create
    #[serde(default)]
    pub departments: Vec<DepartmentSeed>,
    /// Product types to create
    #[serde(default)]
    pub product_types: Vec<ProductTypeSeed>,
    /// Products to create, each referencing a product type
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

/// Seed entry for a branch, matched by name
#[derive(Debug, Clone, Deserialize)]
pub struct BranchSeed {
    /// Name
    pub name: String,
    /// Street address, nullable
    pub address: Option<String>,
    /// City, nullable
    pub city: Option<String>,
    /// State, nullable
    pub state: Option<String>,
    /// Zip code, nullable
    pub zip: Option<String>,
}

/// Seed entry for a department, matched by name
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentSeed {
    /// Name
    pub name: String,
}

/// Seed entry for a product type, matched by code
#[derive(Debug, Clone, Deserialize)]
pub struct ProductTypeSeed {
    /// Product type code
    pub product_type_cd: String,
    /// Name
    pub name: String,
}

/// Seed entry for a product, matched by code
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSeed {
    /// Product code
    pub product_cd: String,
    /// Name
    pub name: String,
    /// Product type code
    pub product_type_cd: String,
    /// Date first offered, nullable
    pub date_offered: Option<chrono::NaiveDate>,
    /// Date retired, nullable
    pub date_retired: Option<chrono::NaiveDate>,
}

/// Counts of rows inserted by [`seed_reference_data`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Branches inserted
    pub branches: usize,
    /// Departments inserted
    pub departments: usize,
    /// Product types inserted
    pub product_types: usize,
    /// Products inserted
    pub products: usize,
}

/// Parses seed configuration from TOML text
///
/// # Errors
/// Returns `Error::Config` if the TOML syntax is invalid or required fields are missing.
pub fn parse_seed_config(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed config: {e}"),
    })
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or parsed.
pub fn load_seed_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load seed data from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {}: {e}", path_ref.display()),
    })?;
    parse_seed_config(&contents)
}

/// Inserts every seed row that is not already present.
///
/// Product types are inserted before products, so a product may reference a type
/// defined in the same file. Returns how many rows of each kind were inserted.
#[instrument(skip(db, config))]
pub async fn seed_reference_data(db: &DatabaseConnection, config: &SeedConfig) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for seed in &config.branches {
        let existing = Branch::find()
            .filter(branch::Column::Name.eq(seed.name.as_str()))
            .one(db)
            .await?;
        if existing.is_none() {
            organization::create_branch(
                db,
                organization::NewBranch {
                    name: seed.name.clone(),
                    address: seed.address.clone(),
                    city: seed.city.clone(),
                    state: seed.state.clone(),
                    zip: seed.zip.clone(),
                },
            )
            .await?;
            summary.branches += 1;
        }
    }

    for seed in &config.departments {
        let existing = Department::find()
            .filter(department::Column::Name.eq(seed.name.as_str()))
            .one(db)
            .await?;
        if existing.is_none() {
            organization::create_department(db, seed.name.clone()).await?;
            summary.departments += 1;
        }
    }

    for seed in &config.product_types {
        if product::get_product_type_by_code(db, &seed.product_type_cd)
            .await?
            .is_none()
        {
            product::create_product_type(db, seed.product_type_cd.clone(), seed.name.clone())
                .await?;
            summary.product_types += 1;
        }
    }

    for seed in &config.products {
        if product::get_product_by_code(db, &seed.product_cd)
            .await?
            .is_none()
        {
            product::create_product(
                db,
                product::NewProduct {
                    product_cd: seed.product_cd.clone(),
                    name: seed.name.clone(),
                    product_type_cd: seed.product_type_cd.clone(),
                    date_offered: seed.date_offered,
                    date_retired: seed.date_retired,
                },
            )
            .await?;
            summary.products += 1;
        }
    }

    info!(?summary, "Reference data seeded.");
    Ok(summary)
}
