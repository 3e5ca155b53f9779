//! Tests for specifications and their combinators.

mod test_binary;
