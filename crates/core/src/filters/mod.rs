pub mod filter_kind;
