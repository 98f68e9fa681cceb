//! Query parser implementation using nom.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! query   := "++"? or_expr
//! or_expr := and_expr (OR and_expr)*
//! and_expr:= unary unary*
//! unary   := "-" unary | NOT unary | primary
//! primary := "(" or_expr ")" | "alt:" unary | "part:" unary
//!          | "!" name | field op value | "phrase" | word
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, cut, map, peek, rest, value, verify},
    error::{Error, ErrorKind},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::ast::{ComparisonOperator, Field, Query, QueryExpr, QueryOptions, Term};
use crate::error::{QueryError, QueryResult};

/// Parse a query string.
///
/// # Examples
///
/// ```rust
/// use cardsearch_query::{parse, Field, QueryExpr};
///
/// let query = parse("t:dragon mana>=2rr -is:funny").unwrap();
/// assert!(matches!(query.expr, QueryExpr::And(ref children) if children.len() == 3));
///
/// let query = parse("++ e:lea").unwrap();
/// assert!(query.options.all_printings);
/// ```
pub fn parse(input: &str) -> QueryResult<Query> {
    let offset = input.len() - input.trim_start().len();
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    check_parentheses(trimmed).map_err(|position| QueryError::UnbalancedParenthesis {
        position: offset + position,
    })?;

    let (body, all_printings) = match trimmed.strip_prefix("++") {
        Some(body) => (body, true),
        None => (trimmed, false),
    };
    if body.trim().is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    match all_consuming(query_expression)(body) {
        Ok((_, expr)) => Ok(Query {
            expr,
            options: QueryOptions { all_printings },
        }),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let position = offset + trimmed.len() - e.input.len();
            if let Some((skip, field)) = find_unknown_field(e.input) {
                return Err(QueryError::UnknownField {
                    position: position + skip,
                    field: field.to_string(),
                });
            }
            Err(QueryError::ParseError {
                position,
                message: format!("unexpected input at: '{}'", truncate(e.input, 20)),
            })
        }
        Err(nom::Err::Incomplete(_)) => Err(QueryError::ParseError {
            position: offset + trimmed.len(),
            message: "incomplete query".to_string(),
        }),
    }
}

fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Returns the byte position of the first parenthesis without a partner.
fn check_parentheses(input: &str) -> Result<(), usize> {
    let mut open = Vec::new();
    let mut in_quotes = false;
    for (i, c) in input.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => open.push(i),
            ')' if !in_quotes => {
                if open.pop().is_none() {
                    return Err(i);
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(position) => Err(position),
        None => Ok(()),
    }
}

/// Finds the first `name:` token in `input` whose name is not a field.
fn find_unknown_field(input: &str) -> Option<(usize, &str)> {
    let mut at_boundary = true;
    for (i, c) in input.char_indices() {
        if at_boundary && c.is_ascii_alphabetic() {
            let tail = &input[i..];
            let len = tail
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(tail.len());
            let (name, after) = tail.split_at(len);
            let special = ["not", "alt", "part"]
                .iter()
                .any(|s| name.eq_ignore_ascii_case(s));
            if let Some(value) = after.strip_prefix(':') {
                let has_value = !value.is_empty() && !value.starts_with(char::is_whitespace);
                if has_value && !special && Field::from_name(name).is_none() {
                    return Some((i, name));
                }
            }
        }
        at_boundary = c.is_whitespace() || matches!(c, '(' | '-');
    }
    None
}

// ============================================================================
// Boolean structure
// ============================================================================

fn query_expression(input: &str) -> IResult<&str, QueryExpr> {
    delimited(ws, or_expression, ws)(input)
}

fn or_expression(input: &str) -> IResult<&str, QueryExpr> {
    let (mut input, first) = and_expression(input)?;
    let mut children = vec![first];
    loop {
        match preceded(delimited(ws, or_keyword, ws), and_expression)(input) {
            Ok((remaining, expr)) => {
                children.push(expr);
                input = remaining;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }
    Ok((input, QueryExpr::or(children)))
}

fn and_expression(input: &str) -> IResult<&str, QueryExpr> {
    let (mut input, first) = unary(input)?;
    let mut children = vec![first];
    loop {
        match preceded(ws, unary)(input) {
            Ok((remaining, expr)) => {
                children.push(expr);
                input = remaining;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }
    Ok((input, QueryExpr::and(children)))
}

fn unary(input: &str) -> IResult<&str, QueryExpr> {
    alt((
        map(preceded(char('-'), unary), |inner| {
            QueryExpr::Not(Box::new(inner))
        }),
        map(preceded(not_keyword, unary), |inner| {
            QueryExpr::Not(Box::new(inner))
        }),
        primary,
    ))(input)
}

fn or_keyword(input: &str) -> IResult<&str, &str> {
    terminated(tag_no_case("or"), peek(alt((mws, tag("(")))))(input)
}

fn not_keyword(input: &str) -> IResult<&str, &str> {
    alt((
        terminated(tag_no_case("not"), mws),
        terminated(tag_no_case("not"), peek(tag("("))),
    ))(input)
}

fn primary(input: &str) -> IResult<&str, QueryExpr> {
    alt((
        group,
        alt_expression,
        part_expression,
        exact_name,
        field_term,
        phrase,
        word,
    ))(input)
}

fn group(input: &str) -> IResult<&str, QueryExpr> {
    delimited(pair(char('('), ws), or_expression, pair(ws, char(')')))(input)
}

fn alt_expression(input: &str) -> IResult<&str, QueryExpr> {
    map(preceded(tag_no_case("alt:"), cut(unary)), |inner| {
        QueryExpr::Alt(Box::new(inner))
    })(input)
}

fn part_expression(input: &str) -> IResult<&str, QueryExpr> {
    map(preceded(tag_no_case("part:"), cut(unary)), |inner| {
        QueryExpr::Part(Box::new(inner))
    })(input)
}

// ============================================================================
// Terms
// ============================================================================

fn exact_name(input: &str) -> IResult<&str, QueryExpr> {
    let (input, _) = char('!')(input)?;
    let (input, name) = cut(alt((
        quoted,
        map(verify(rest, |s: &str| !s.trim().is_empty()), str::trim),
    )))(input)?;
    Ok((
        input,
        QueryExpr::Term(Term::matching(Field::ExactName, name)),
    ))
}

fn field_term(input: &str) -> IResult<&str, QueryExpr> {
    let (after_name, name) = take_while1(|c: char| c.is_ascii_alphabetic())(input)?;
    let negated = name.eq_ignore_ascii_case("not");
    let field = if negated {
        Field::Is
    } else {
        Field::from_name(name).ok_or(nom::Err::Error(Error::new(input, ErrorKind::Tag)))?
    };

    let (after_op, operator) = alt((
        value(ComparisonOperator::Match, char(':')),
        delimited(ws, comparison_operator, ws),
    ))(after_name)?;

    let (remaining, (text, was_quoted)) = cut(alt((
        map(quoted, |s| (s, true)),
        map(bare_value, |s| (s, false)),
    )))(after_op)?;

    let expr = if !was_quoted && field.accepts_value_list() && text.contains(',') {
        let values: Vec<QueryExpr> = text
            .split(',')
            .filter(|v| !v.is_empty())
            .map(|v| QueryExpr::Term(Term::new(field, operator, v)))
            .collect();
        if values.is_empty() {
            return Err(nom::Err::Failure(Error::new(after_op, ErrorKind::Verify)));
        }
        QueryExpr::or(values)
    } else {
        QueryExpr::Term(Term::new(field, operator, text))
    };

    if negated {
        Ok((remaining, QueryExpr::Not(Box::new(expr))))
    } else {
        Ok((remaining, expr))
    }
}

fn comparison_operator(input: &str) -> IResult<&str, ComparisonOperator> {
    alt((
        value(ComparisonOperator::GreaterThanOrEqual, tag(">=")),
        value(ComparisonOperator::LessThanOrEqual, tag("<=")),
        value(ComparisonOperator::Equal, tag("=")),
        value(ComparisonOperator::GreaterThan, tag(">")),
        value(ComparisonOperator::LessThan, tag("<")),
    ))(input)
}

fn phrase(input: &str) -> IResult<&str, QueryExpr> {
    map(verify(quoted, |s: &str| !s.trim().is_empty()), |s| {
        QueryExpr::Term(Term::matching(Field::Name, s))
    })(input)
}

fn word(input: &str) -> IResult<&str, QueryExpr> {
    let (remaining, token) = verify(
        take_while1(|c: char| !c.is_whitespace() && !matches!(c, '(' | ')' | '"')),
        |t: &str| !t.starts_with('-') && !t.eq_ignore_ascii_case("or"),
    )(input)?;

    // A trailing colon is punctuation ("Protection:"); an inner one means an unknown field.
    let token = match token.find(':') {
        None => token,
        Some(idx) if idx > 0 && idx + 1 == token.len() => &token[..idx],
        Some(_) => return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify))),
    };

    Ok((remaining, QueryExpr::Term(Term::matching(Field::Name, token))))
}

fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c| c == '"'), char('"'))(input)
}

fn bare_value(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, '(' | ')' | '"'))(input)
}

// ============================================================================
// Whitespace helpers
// ============================================================================

/// Optional whitespace
fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

/// Mandatory whitespace
fn mws(input: &str) -> IResult<&str, &str> {
    multispace1(input)
}
