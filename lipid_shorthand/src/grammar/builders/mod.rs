//! Builder functions for the lipid name grammar productions

pub mod atomic;
pub mod chains;
pub mod lipid;

pub use atomic::{
    at_adduct_start, parse_bracketed_text, parse_db_position, parse_db_positions,
    parse_ether_prefix, parse_hydroxyl_suffix, parse_lcb_hydroxyl, with_context, Parser,
};

pub use chains::{chain_starts_at, parse_chain, parse_chain_list};

pub use lipid::{is_mediator_name, parse_adduct, parse_head_group, parse_lipid_tree};
