mod amount;
mod errors;
#[cfg(test)]
mod tests;

pub use amount::Amount;
