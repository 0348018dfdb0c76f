#[cfg(test)]
pub mod abi_wire_tests;
#[cfg(test)]
pub mod futures_credits_tests;
#[cfg(test)]
pub mod parent_demand_tests;
#[cfg(test)]
pub mod template_demand_tests;
#[cfg(test)]
pub mod utils;
