use crate::printer::PrintTree;
use crate::statements::StatementList;
use std::fmt::{Display, Formatter};

/// The root of a parsed source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: StatementList,
}

impl Program {
    pub fn new(statements: StatementList) -> Self {
        Self { statements }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.print_tree(f, 0)
    }
}
