#[path = "property/quorum_monotonicity.rs"]
mod quorum_monotonicity;

#[path = "property/passing_rule.rs"]
mod passing_rule;

#[path = "property/transition_table.rs"]
mod transition_table;

#[path = "property/delegation_acyclic.rs"]
mod delegation_acyclic;
