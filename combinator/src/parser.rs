use std::rc::Rc;

use chumsky::prelude::*;

use crate::{
    lang::{is_variable_name, Term, Token},
    prelude::*,
};

pub trait SimpleParser<I: Clone + std::hash::Hash, O>:
    Parser<I, O, Error = Error<I>> + Clone
{
    #[allow(clippy::type_complexity)]
    fn spanned(self) -> chumsky::combinator::MapWithSpan<Self, fn(O, Span) -> Spanned<O>, O>
    where
        Self: Sized,
        I: std::cmp::Eq,
    {
        self.map_with_span(|value, span| Spanned { span, value })
    }

    fn refcounted(self) -> chumsky::combinator::Map<Self, fn(O) -> std::rc::Rc<O>, O>
    where
        Self: Sized,
        I: std::cmp::Eq,
    {
        self.map(Rc::new)
    }
}
impl<I: Clone + std::hash::Hash, O, T> SimpleParser<I, O> for T where
    T: Parser<I, O, Error = Error<I>> + Clone
{
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | '.' | 'λ') || c.is_whitespace()
}

pub fn lexer() -> impl SimpleParser<char, Vec<Spanned<Token>>> {
    let punctuation = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('.').to(Token::Dot),
        just('λ').to(Token::Lambda),
    ));
    let letter = filter(|c: &char| is_variable_name(*c)).map(Token::Letter);
    // a symbol may contain lowercase letters, it just cannot start with one
    let symbol = filter(|c: &char| !is_delimiter(*c) && !is_variable_name(*c))
        .chain(filter(|c: &char| !is_delimiter(*c)).repeated())
        .collect::<String>()
        .map(|name| Token::Symbol(Identifier::new(name)));
    let token = choice((punctuation, letter, symbol));
    token.spanned().padded().repeated().then_ignore(end())
}

fn term_parser() -> impl SimpleParser<Token, Spanned<Term>> {
    recursive(|term: Recursive<_, Spanned<Term>, _>| {
        let letter = select! { Token::Letter(c) => c }.spanned();
        let symbol = select! { Token::Symbol(name) => name }.labelled("symbol");

        let group = term
            .clone()
            .map(Spanned::forget_span)
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .labelled("group");

        // λ xyz . term; an empty parameter list is rejected when the term is built
        let abs = just(Token::Lambda)
            .ignore_then(letter.clone().repeated())
            .then_ignore(just(Token::Dot))
            .then(term.refcounted())
            .map(|(params, body)| Term::Abstract(params, body))
            .labelled("abstract");

        let atom = choice((
            abs,
            group,
            letter.map(Spanned::forget_span).map(Term::Letter),
            symbol.map(Term::Symbol),
        ))
        .spanned();

        atom.repeated()
            .at_least(1)
            .map(Term::Sequence)
            .spanned()
            .labelled("sequence")
    })
    .labelled("term")
}

pub fn parse(s: &str) -> Result<Spanned<Term>, Vec<Error>> {
    let len = s.chars().count();
    let eoi = Span {
        start: len,
        end: len + 1,
    };
    let tokens = lexer().parse(s).map_err(|es| {
        es.into_iter()
            .map(|e| e.map(|c| c.to_string()))
            .collect::<Vec<_>>()
    })?;
    term_parser()
        .then_ignore(end())
        .parse(chumsky::Stream::from_iter(
            eoi,
            tokens
                .into_iter()
                .map(|Spanned { span, value }| (value, span)),
        ))
        .map_err(|es| {
            es.into_iter()
                .map(|e| e.map(|t| t.to_string()))
                .collect::<Vec<_>>()
        })
}
