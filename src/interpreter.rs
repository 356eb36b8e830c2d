/// The compiler flattens a parsed tree into a postfix program.
///
/// Each node becomes a fragment that evaluates to exactly one value; calls
/// are checked against the function registry at this point, so a compiled
/// program only names functions that exist with a matching arity.
///
/// # Responsibilities
/// - Defines the `Instruction` set and the immutable `Program`.
/// - Rejects unknown functions and wrong argument counts early.
pub mod compiler;
/// The evaluator module runs compiled programs.
///
/// The evaluator pops instructions from the tail of a program, recursing for
/// operands, and combines scalars and vectors with broadcasting. It is the
/// core execution engine of the interpreter.
///
/// # Responsibilities
/// - Resolves variables against caller-supplied bindings.
/// - Dispatches calls to the built-in function registry.
/// - Reports shape mismatches, missing bindings and excessive depth.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens: numbers, identifiers, operators, parentheses and commas.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with byte spans.
/// - Classifies numeric literals as integers or reals.
/// - Reports lexical errors with line and column.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that encodes precedence and associativity.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates the grammar, reporting errors with location info.
/// - Bounds nesting depth.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Values are integers (from bare literals), reals and vectors of reals.
pub mod value;
