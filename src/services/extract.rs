//! The extraction driver.
//!
//! Orchestrates the two-phase run: write the full category table, then walk
//! the categories in listing order and stream their top products into the
//! second table. Execution is strictly sequential and all-or-nothing: any
//! catalog or write failure aborts the whole run. The category table is
//! finalized before the product pass starts, so a failed product pass leaves
//! it intact; product rows are flushed per category, so a mid-pass failure
//! leaves the completed categories' rows on disk and nothing else.

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::client::{CatalogError, CatalogReader};
use crate::domain::category::Category;
use crate::domain::product::ProductRow;

/// File name of the category table inside the output directory.
pub const CATEGORIES_TABLE: &str = "heureka_categories_list.csv";
/// File name of the top-products table inside the output directory.
pub const TOP_PRODUCTS_TABLE: &str = "heureka_top_products.csv";

const CATEGORY_COLUMNS: [&str; 7] = [
    "id",
    "parent_id",
    "name",
    "slug",
    "is_leaf",
    "product_count",
    "url",
];
const PRODUCT_COLUMNS: [&str; 5] = ["id", "name", "slug", "url", "category_id"];

/// Errors produced while running an extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("catalog call failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error("failed to write output table: {0}")]
    Table(#[from] csv::Error),
    #[error("output i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Aggregated outcome of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub categories: usize,
    pub product_rows: usize,
    /// Categories whose detail returned no top products. Expected, not an
    /// error.
    pub empty_categories: usize,
}

impl Display for ExtractionReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} categories, {} product rows ({} categories without top products)",
            self.categories, self.product_rows, self.empty_categories
        )
    }
}

/// Write the category table: the fixed seven-column header followed by one
/// row per category, in the order received.
pub fn write_category_table<W: Write>(
    categories: &[Category],
    out: W,
) -> Result<(), ExtractError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(CATEGORY_COLUMNS)?;
    for category in categories {
        writer.serialize(category)?;
    }
    writer.flush()?;
    Ok(())
}

/// Fetch each category's detail in listing order and stream its top products
/// into the table, tagged with the owning category's id.
///
/// The header goes out before the first detail call, so even a run that
/// fails on the first category leaves a well-formed (if empty) table.
pub fn write_top_products<C, W>(
    catalog: &C,
    categories: &[Category],
    out: W,
) -> Result<ExtractionReport, ExtractError>
where
    C: CatalogReader,
    W: Write,
{
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(PRODUCT_COLUMNS)?;
    writer.flush()?;

    let mut report = ExtractionReport {
        categories: categories.len(),
        ..ExtractionReport::default()
    };
    for category in categories {
        log::info!("Downloading category {}.", category.name);
        let detail = catalog.get_category_detail(category.id)?;
        if detail.top_products.is_empty() {
            report.empty_categories += 1;
            continue;
        }
        for product in detail.top_products {
            writer.serialize(ProductRow::new(product, category.id))?;
            report.product_rows += 1;
        }
        writer.flush()?;
    }
    Ok(report)
}

/// Run the whole extraction into `out_dir`.
///
/// The listing is fetched before any output file is created: a failed
/// listing call produces no table at all.
pub fn run_extraction<C: CatalogReader>(
    catalog: &C,
    out_dir: &Path,
) -> Result<ExtractionReport, ExtractError> {
    let categories = catalog.list_categories()?;

    let categories_out = File::create(out_dir.join(CATEGORIES_TABLE))?;
    write_category_table(&categories, categories_out)?;
    log::info!("Written category list.");

    let products_out = File::create(out_dir.join(TOP_PRODUCTS_TABLE))?;
    write_top_products(catalog, &categories, products_out)
}
