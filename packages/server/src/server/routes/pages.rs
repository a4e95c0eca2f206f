use crate::common::Outcome;
use crate::domains::pages;

pub async fn about() -> Outcome {
    pages::about()
}

pub async fn rules() -> Outcome {
    pages::rules()
}
