use crate::Token;

/// The whole input as literal runs.
pub(crate) fn parse(data: &[u8]) -> Vec<Token<'_>> {
    let mut tokens = Vec::with_capacity(1);
    super::push_literal(&mut tokens, data);
    tokens
}
