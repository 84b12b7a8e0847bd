/// The closed operation set of the language. `PushInt` is the only variant
/// carrying an operand. Adding a variant forces a new arm in both the
/// parser's token table and the code generator's lowering match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    PushInt(i64),
    Plus,
    Minus,
    Dump,
}

/// An ordered sequence of operations; insertion order is execution order.
/// Operations carry no source positions, all diagnostics happen at parse
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    pub fn new(ops: Vec<Op>) -> Self {
        Self { ops }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
