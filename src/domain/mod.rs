pub mod availability;
pub mod eligibility;
pub mod selection;

#[cfg(test)]
pub mod fixtures;
