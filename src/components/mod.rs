pub mod lender_match;
