use std::error::Error;

use netdiff_models::{models, ModelSummary};

use super::print_json;

pub fn run() -> Result<(), Box<dyn Error>> {
    let summaries: Vec<ModelSummary> = models().iter().map(|model| model.summary()).collect();
    print_json(&summaries)
}
