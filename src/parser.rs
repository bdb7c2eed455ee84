use pest::iterators::Pair;
use pest::Parser;

use crate::ast::*;
use crate::error::PositionedError;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct ClauseParser;

/**
 * Single all-or-nothing recognition attempt over `text`. Nothing is built;
 * use `parse` when the syntax tree is wanted.
 */
pub fn recognize(text: &str) -> Result<(), PositionedError> {
    ClauseParser::parse(Rule::program, text)
        .map(|_| ())
        .map_err(PositionedError::new)
}

/**
 * Top-level function for parsing a program into its syntax tree.
 */
pub fn parse(text: &str) -> Result<Program, PositionedError> {
    let pairs = ClauseParser::parse(Rule::program, text).map_err(PositionedError::new)?;

    let mut clauses = Vec::new();
    let mut query = None;
    for pair in pairs {
        match pair.as_rule() {
            Rule::clause => clauses.push(construct_clause(pair)),
            Rule::query => query = Some(construct_query(pair)),
            Rule::EOI => (),
            _ => unreachable!(),
        }
    }

    let program = Program {
        clauses,
        query: query.expect("a matched program ends with a query"),
    };
    log::trace!(
        "parsed {} clauses ({} facts), query with {} goals",
        program.clauses.len(),
        program.clauses.iter().filter(|clause| clause.is_fact()).count(),
        program.query.goals.len()
    );
    Ok(program)
}

/// How a rule reads in an "expected ..." message.
pub fn describe_rule(rule: &Rule) -> String {
    let name = match rule {
        Rule::program => "program",
        Rule::clause => "clause",
        Rule::query => "query",
        Rule::predicate_list | Rule::predicate => "predicate",
        Rule::term_list | Rule::term => "term",
        Rule::structure => "structure",
        Rule::atom | Rule::small_atom | Rule::quoted_atom => "atom",
        Rule::string => "quoted text",
        Rule::variable => "variable",
        Rule::numeral => "numeral",
        Rule::neck => "\":-\"",
        Rule::query_start => "\"?-\"",
        Rule::dot => "\".\"",
        Rule::comma => "\",\"",
        Rule::lparen => "\"(\"",
        Rule::rparen => "\")\"",
        Rule::EOI => "end of input",
        _ => return format!("{:?}", rule),
    };
    name.to_string()
}

fn construct_clause(pair: Pair<Rule>) -> Clause {
    let mut it = pair.into_inner();
    let head = construct_predicate(it.next().expect("a clause starts with its head"));

    let mut body = Vec::new();
    for pair in it {
        if pair.as_rule() == Rule::predicate_list {
            body = construct_predicate_list(pair);
        }
    }

    Clause { head, body }
}

fn construct_query(pair: Pair<Rule>) -> Query {
    let goals = pair
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::predicate_list)
        .map(construct_predicate_list)
        .unwrap_or_default();
    Query { goals }
}

fn construct_predicate_list(pair: Pair<Rule>) -> Vec<Predicate> {
    pair.into_inner()
        .filter(|pair| pair.as_rule() == Rule::predicate)
        .map(construct_predicate)
        .collect()
}

fn construct_predicate(pair: Pair<Rule>) -> Predicate {
    let mut it = pair.into_inner();
    let name = construct_atom(it.next().expect("a predicate starts with an atom"));

    let arguments = it
        .filter(|pair| pair.as_rule() == Rule::term_list)
        .map(construct_term_list)
        .collect();

    Predicate { name, arguments }
}

fn construct_term_list(pair: Pair<Rule>) -> Vec<Term> {
    pair.into_inner()
        .filter(|pair| pair.as_rule() == Rule::term)
        .map(construct_term)
        .collect()
}

fn construct_term(pair: Pair<Rule>) -> Term {
    match pair.as_rule() {
        Rule::atom => Term::Atom(construct_atom(pair)),
        Rule::variable => Term::Variable(pair.as_str().to_string()),
        Rule::numeral => Term::Numeral(pair.as_str().to_string()),
        Rule::structure => construct_structure(pair),
        Rule::term => construct_term(pair.into_inner().next().expect("a term has one alternative")),
        _ => unreachable!(),
    }
}

fn construct_structure(pair: Pair<Rule>) -> Term {
    let mut it = pair.into_inner();
    let functor = construct_atom(it.next().expect("a structure starts with its functor"));

    let arguments = it
        .find(|pair| pair.as_rule() == Rule::term_list)
        .map(construct_term_list)
        .unwrap_or_default();

    Term::Structure(Structure { functor, arguments })
}

fn construct_atom(pair: Pair<Rule>) -> Atom {
    match pair.as_rule() {
        Rule::atom => construct_atom(pair.into_inner().next().expect("an atom is bare or quoted")),
        Rule::small_atom => Atom::Name(pair.as_str().to_string()),
        // The quotes are literals; only the string is left inside.
        Rule::quoted_atom => Atom::Quoted(pair.into_inner().map(|inner| inner.as_str()).collect()),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::*;

    fn parse_and_unwrap(rule: Rule, code: &str) -> Pair<Rule> {
        ClauseParser::parse(rule, code)
            .unwrap()
            .next()
            .unwrap()
    }

    fn name(text: &str) -> Atom {
        Atom::Name(String::from(text))
    }

    fn bare(text: &str) -> Predicate {
        Predicate { name: name(text), arguments: Vec::new() }
    }

    #[test]
    fn test_construct_term_atom() {
        let pair = parse_and_unwrap(Rule::term, "abc");
        let term = construct_term(pair);
        assert_eq!(term, Term::Atom(name("abc")));
    }

    #[test]
    fn test_construct_term_variable() {
        let pair = parse_and_unwrap(Rule::term, "Abc");
        let term = construct_term(pair);
        assert_eq!(term, Term::Variable(String::from("Abc")));
    }

    #[test]
    fn test_construct_term_underscore() {
        let pair = parse_and_unwrap(Rule::term, "_abc");
        let term = construct_term(pair);
        assert_eq!(term, Term::Variable(String::from("_abc")));
    }

    #[test]
    fn test_construct_term_numeral() {
        let pair = parse_and_unwrap(Rule::term, "0042");
        let term = construct_term(pair);
        assert_eq!(term, Term::Numeral(String::from("0042")));
    }

    #[test]
    fn test_construct_term_quoted_atom() {
        let pair = parse_and_unwrap(Rule::term, "'hello world+1 ?-.'");
        let term = construct_term(pair);
        assert_eq!(term, Term::Atom(Atom::Quoted(String::from("hello world+1 ?-."))));
    }

    #[test]
    #[should_panic]
    fn test_construct_term_panic() {
        let pair = parse_and_unwrap(Rule::term, "#abc");
        let _ = construct_term(pair);
    }

    #[test]
    fn test_construct_term_structure() {
        let pair = parse_and_unwrap(Rule::term, "f(g(X, 1), b)");
        let term = construct_term(pair);

        let inner = Term::Structure(Structure {
            functor: name("g"),
            arguments: vec![Term::Variable(String::from("X")), Term::Numeral(String::from("1"))],
        });
        let expected_term = Term::Structure(Structure {
            functor: name("f"),
            arguments: vec![inner, Term::Atom(name("b"))],
        });

        assert_eq!(expected_term, term);
    }

    #[test]
    fn test_construct_predicate_repeated_groups() {
        let pair = parse_and_unwrap(Rule::predicate, "p(X)(Y, z)");
        let predicate = construct_predicate(pair);

        let expected_predicate = Predicate {
            name: name("p"),
            arguments: vec![
                vec![Term::Variable(String::from("X"))],
                vec![Term::Variable(String::from("Y")), Term::Atom(name("z"))],
            ],
        };

        assert_eq!(expected_predicate, predicate);
    }

    #[test]
    fn test_construct_clause_without_body() {
        let pair = parse_and_unwrap(Rule::clause, "likes(mary, wine).");
        let clause = construct_clause(pair);

        let expected_clause = Clause {
            head: Predicate {
                name: name("likes"),
                arguments: vec![vec![Term::Atom(name("mary")), Term::Atom(name("wine"))]],
            },
            body: Vec::new(),
        };

        assert!(clause.is_fact());
        assert_eq!(expected_clause, clause);
    }

    #[test]
    fn test_construct_clause_with_body() {
        let pair = parse_and_unwrap(Rule::clause, "happy :- sunny, warm.");
        let clause = construct_clause(pair);

        let expected_clause = Clause {
            head: bare("happy"),
            body: vec![bare("sunny"), bare("warm")],
        };

        assert!(!clause.is_fact());
        assert_eq!(expected_clause, clause);
    }

    #[test]
    fn test_parse() {
        let program = parse("a.\nb :- a.\n?- b, 'c d'.\n").unwrap();

        let expected_program = Program {
            clauses: vec![
                Clause { head: bare("a"), body: Vec::new() },
                Clause { head: bare("b"), body: vec![bare("a")] },
            ],
            query: Query {
                goals: vec![
                    bare("b"),
                    Predicate { name: Atom::Quoted(String::from("c d")), arguments: Vec::new() },
                ],
            },
        };

        assert_eq!(expected_program, program);
    }

    #[test]
    fn test_parse_query_only() {
        let program = parse("?- go.").unwrap();
        assert!(program.clauses.is_empty());
        assert!(program.query.goals[0].is_bare());
    }

    #[test]
    fn test_recognize_accepts_valid_programs() {
        assert!(recognize("foo(a,b). ?-foo(a,b).").is_ok());
        assert!(recognize("p(X)(Y). ?-p(X)(Y).").is_ok());
        assert!(recognize("  foo ( a , B1 ) .\n\n?-  foo(a, 12) .\n").is_ok());
        assert!(recognize("r(X) :- s(X, 'a+b'), t.\n?- r(_z).").is_ok());
    }

    #[test]
    fn test_recognize_rejects_missing_query() {
        let error = recognize("foo(a).").unwrap_err();
        assert_eq!(error.offset(), 7);
        assert!(error.message().contains("\"?-\""));
    }

    #[test]
    fn test_recognize_rejects_variable_as_predicate() {
        let error = recognize("Foo(a). ?- foo(a).").unwrap_err();
        assert_eq!(error.offset(), 0);

        let message = error.message();
        assert!(message.contains("expected atom or \"?-\""), "{}", message);
        assert!(!message.contains("program"), "{}", message);
    }

    #[test]
    fn test_recognize_rejects_structure_with_repeated_groups() {
        // Only predicates may repeat argument groups; a nested term may not.
        assert!(recognize("p(f(a)(b)). ?- p(a).").is_err());
    }

    #[test]
    fn test_recognize_rejects_split_query_marker() {
        assert!(recognize("?- a.").is_ok());
        assert!(recognize("? - a.").is_err());
    }

    #[test]
    fn test_recognize_reports_position_and_expected_tokens() {
        let error = recognize("foo(a,b) ?-foo(a,b).").unwrap_err();

        assert_eq!(error.offset(), 9);
        assert_eq!(error.line_col(), (1, 10));

        let message = error.message();
        assert!(message.contains("1:10"), "{}", message);
        assert!(message.contains("\".\""), "{}", message);
        assert!(message.contains("\":-\""), "{}", message);
    }

    #[test]
    fn test_message_at_line_rewrites_header_and_gutter() {
        let error = recognize("foo(a,b) ?-foo(a,b).").unwrap_err();
        let message = error.message_at_line(12);
        let lines: Vec<&str> = message.lines().collect();

        assert_eq!(lines[0], "  --> 12:10");
        assert_eq!(lines[1], "   |");
        assert_eq!(lines[2], "12 | foo(a,b) ?-foo(a,b).");
        assert!(lines[3].starts_with("   |"), "{}", message);
        assert!(lines[5].starts_with("   = expected"), "{}", message);
    }

    #[test]
    fn test_message_at_own_line_is_unchanged() {
        let error = recognize("ok.\nbroken(.\n?- ok.").unwrap_err();
        assert_eq!(error.line_col(), (2, 8));
        assert_eq!(error.message_at_line(2), error.message());
    }
}
