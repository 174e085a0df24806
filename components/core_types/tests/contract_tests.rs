//! Integration test runner for contract tests

#[path = "contracts/test_contract_compliance.rs"]
mod test_contract_compliance;
