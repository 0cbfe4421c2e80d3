/// AST (Abstract Syntax Tree) module
/// Contains the tree produced by the rule engine
///
/// Submodules:
/// - node: the uniform Node container and its children
pub mod node;

#[cfg(test)]
mod tests;
