pub mod use_literal;
