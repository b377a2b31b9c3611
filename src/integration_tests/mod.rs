pub mod golden_datasets;
pub mod reference_fields;
