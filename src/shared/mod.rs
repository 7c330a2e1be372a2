pub mod templates;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
