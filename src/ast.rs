/**
 * Syntax tree of a checked program. Only built from a parse that matched the
 * whole input; a failed attempt never leaves a partial tree behind.
 */
#[derive(Debug, PartialEq)]
pub struct Program {
    pub clauses: Vec<Clause>,
    pub query: Query,
}

/// A fact when `body` is empty, otherwise a rule `head :- body.`
#[derive(Debug, PartialEq)]
pub struct Clause {
    pub head: Predicate,
    pub body: Vec<Predicate>,
}

#[derive(Debug, PartialEq)]
pub struct Query {
    pub goals: Vec<Predicate>,
}

/**
 * An atom applied to zero or more argument groups. Each group is one
 * parenthesized term list, so `p(X)(Y)` has two groups of one term each.
 */
#[derive(Debug, PartialEq)]
pub struct Predicate {
    pub name: Atom,
    pub arguments: Vec<Vec<Term>>,
}

#[derive(Debug, PartialEq)]
pub enum Term {
    Atom(Atom),
    Variable(String),
    Structure(Structure),
    Numeral(String),
}

#[derive(Debug, PartialEq)]
pub struct Structure {
    pub functor: Atom,
    pub arguments: Vec<Term>,
}

#[derive(Debug, PartialEq)]
pub enum Atom {
    Name(String),
    // Text between the quotes.
    Quoted(String),
}

impl Clause {
    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }
}

impl Predicate {
    pub fn is_bare(&self) -> bool {
        self.arguments.is_empty()
    }
}
