//! Declarator text parser.
//!
//! Accepts the type text an API extractor reports for a parameter or return
//! value (`CV_EXPORTS const Point_<int> &`, `unsigned int *`, `...`) and
//! decomposes it into a [`TypeDescriptor`].

use chumsky::prelude::*;
use chumsky::recursive::Recursive;

use crate::descriptor::{Indirection, TypeDescriptor};
use crate::error::TypeError;
use crate::native::{BUILTIN_WORDS, canonical_builtin};

/// Storage and linkage words that may precede a declarator.
const ANNOTATION_WORDS: &[&str] = &[
    "virtual", "static", "inline", "extern", "explicit", "friend", "constexpr", "mutable",
    "typename", "struct", "class", "enum",
];

#[derive(Debug)]
struct RawDeclarator {
    words: Vec<String>,
    template_args: Option<Vec<String>>,
    trailing_const: bool,
    markers: Vec<char>,
    array_suffix: Option<String>,
}

fn template_arg_list() -> impl Parser<char, Vec<String>, Error = Simple<char>> + Clone {
    let template_arg = recursive(|arg: Recursive<'_, char, String, Simple<char>>| {
        let nested = arg
            .separated_by(just(','))
            .delimited_by(just('<'), just('>'))
            .map(|args: Vec<String>| format!("<{}>", args.join(", ")));

        filter(|c: &char| !matches!(c, '<' | '>' | ','))
            .repeated()
            .at_least(1)
            .collect::<String>()
            .or(nested)
            .repeated()
            .at_least(1)
            .map(|parts: Vec<String>| normalize_spaces(&parts.concat()))
    });

    template_arg
        .separated_by(just(','))
        .delimited_by(just('<'), just('>'))
}

fn qualified_ident() -> impl Parser<char, String, Error = Simple<char>> + Clone {
    just("::")
        .or_not()
        .ignore_then(text::ident().separated_by(just("::")).at_least(1))
        .map(|segments: Vec<String>| segments.join("::"))
}

fn declarator() -> impl Parser<char, RawDeclarator, Error = Simple<char>> {
    let array_suffix = none_of("]")
        .repeated()
        .collect::<String>()
        .delimited_by(just('['), just(']'))
        .map(|size| format!("[{}]", size.trim()));

    qualified_ident()
        .padded()
        .repeated()
        .at_least(1)
        .then(template_arg_list().padded().or_not())
        .then(text::keyword("const").padded().or_not())
        .then(one_of("*&").padded().repeated())
        .then_ignore(text::keyword("const").padded().or_not())
        .then(array_suffix.padded().or_not())
        .then_ignore(end())
        .map(
            |((((words, template_args), trailing_const), markers), array_suffix)| RawDeclarator {
                words,
                template_args,
                trailing_const: trailing_const.is_some(),
                markers,
                array_suffix,
            },
        )
}

fn describe(errors: &[Simple<char>]) -> String {
    match errors.first() {
        Some(error) => match error.found() {
            Some(found) => format!("unexpected `{found}` at offset {}", error.span().start),
            None => "unexpected end of input".to_string(),
        },
        None => "unparseable".to_string(),
    }
}

fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Export macros such as `CV_EXPORTS_W` or `FOO_API`.
fn is_export_macro(word: &str) -> bool {
    word.len() > 1
        && word
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && (word.contains("EXPORT") || word.ends_with("API"))
}

/// Parses declarator text into a [`TypeDescriptor`].
///
/// Fails with [`TypeError::MalformedDeclarator`] rather than guessing when
/// the text does not decompose.
pub fn parse_declarator(text: &str) -> Result<TypeDescriptor, TypeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TypeError::malformed(text, "empty declarator"));
    }
    if trimmed == "..." {
        return Ok(TypeDescriptor::variadic());
    }

    let raw = declarator()
        .parse(trimmed)
        .map_err(|errors| TypeError::malformed(text, describe(&errors)))?;

    let mut words = raw.words.as_slice();
    while let Some((first, rest)) = words.split_first()
        && !rest.is_empty()
        && (ANNOTATION_WORDS.contains(&first.as_str()) || is_export_macro(first))
    {
        words = rest;
    }

    let mut is_const = raw.trailing_const;
    let mut name_words = Vec::new();
    for word in words {
        match word.as_str() {
            "const" => is_const = true,
            "volatile" => {}
            other => name_words.push(other),
        }
    }

    let base = match name_words.as_slice() {
        [] => return Err(TypeError::malformed(text, "missing base type")),
        [single] if !BUILTIN_WORDS.contains(single) => (*single).to_string(),
        several => {
            if let Some(stray) = several.iter().find(|w| !BUILTIN_WORDS.contains(*w)) {
                return Err(TypeError::malformed(
                    text,
                    format!("unexpected word `{stray}`"),
                ));
            }
            let spelled = several.join(" ");
            canonical_builtin(&spelled)
                .ok_or_else(|| TypeError::malformed(text, format!("`{spelled}` is not a builtin type")))?
                .to_string()
        }
    };

    let indirection = match raw.markers.as_slice() {
        [] => Indirection::Value,
        ['&'] => Indirection::Reference,
        markers if markers.iter().all(|c| *c == '*') => Indirection::Pointer {
            depth: u8::try_from(markers.len())
                .map_err(|_| TypeError::malformed(text, "pointer depth overflow"))?,
        },
        ['&', '&'] => return Err(TypeError::malformed(text, "rvalue references are not bindable")),
        _ => {
            return Err(TypeError::malformed(
                text,
                "pointer and reference markers are mutually exclusive",
            ));
        }
    };

    Ok(TypeDescriptor {
        base: base.into(),
        is_const,
        indirection,
        template_args: raw.template_args.unwrap_or_default(),
        array_suffix: raw.array_suffix,
        variadic: false,
    })
}

/// Splits the contents of a template argument list (`int, Foo<a, b>`) at
/// top-level commas.
pub fn parse_template_args(text: &str) -> Result<Vec<String>, TypeError> {
    let wrapped = format!("<{}>", text.trim());
    template_arg_list()
        .then_ignore(end())
        .parse(wrapped.as_str())
        .map_err(|errors| TypeError::malformed(text, describe(&errors)))
}
