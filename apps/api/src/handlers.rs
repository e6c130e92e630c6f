pub mod health;
pub mod parents;
pub mod privacy;

#[cfg(test)]
mod test_support;
