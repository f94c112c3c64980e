// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Argument vector rewriting.
//!
//! Doty lets the user type global flags anywhere, and lets command groups fall
//! back to a default child when none was given. Both features are implemented
//! by rewriting the raw argument vector before it is handed to the parser.
//!
//! # Token Classes
//!
//! Tokens after the program name fall into three classes:
//!
//! - A __flag__ starts with `-`, except for `-` and `--` themselves.
//! - A __value__ directly follows a flag that takes a value, when that flag is
//!   not written in `--flag=value` form.
//! - Everything else is __positional__, including `--` and every token after
//!   it.
//!
//! Short flags may be clustered together, e.g., `-nc path`. Clap reads a
//! cluster left to right, and the first short flag that takes a value eats the
//! rest of the cluster as its value. So a cluster only takes the next token as
//! its value when that short flag is its last character, e.g., `-nc path` but
//! not `-ncdoty.toml`.

/// Long flags that consume the token following them.
const VALUED_LONGS: &[&str] = &["--config-file", "--key-file", "--log-level", "--output"];

/// Short flags that take a value.
const VALUED_SHORTS: &[char] = &['c', 'K', 'l', 'o'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Flag,
    Value,
    Positional,
}

fn classify(tail: &[String]) -> Vec<Token> {
    let mut classes = Vec::with_capacity(tail.len());
    let mut expect_value = false;
    let mut terminated = false;

    for token in tail {
        let class = if terminated {
            Token::Positional
        } else if expect_value {
            expect_value = false;
            Token::Value
        } else if token == "--" {
            terminated = true;
            Token::Positional
        } else if token.starts_with('-') && token != "-" {
            expect_value = takes_next_value(token);
            Token::Flag
        } else {
            Token::Positional
        };
        classes.push(class);
    }

    classes
}

fn takes_next_value(flag: &str) -> bool {
    if flag.starts_with("--") {
        return VALUED_LONGS.contains(&flag);
    }

    let mut cluster = flag.trim_start_matches('-').chars();
    while let Some(short) = cluster.next() {
        if short == '=' {
            return false;
        }

        if VALUED_SHORTS.contains(&short) {
            return cluster.as_str().is_empty();
        }
    }

    false
}

/// Move global flags typed before a subcommand to after it.
///
/// The leading run of flags (with their values) after the program name is
/// placed after the remaining tokens, so the innermost command parses them.
/// If the remaining tokens contain a `--` terminator, the moved flags go right
/// before it.
///
/// Returns the input unchanged when there is no leading run of flags, or when
/// there is no positional token to move the flags past. Applying this function
/// to its own output changes nothing.
pub fn move_global_args(args: &[String]) -> Vec<String> {
    let Some((program, tail)) = args.split_first() else {
        return Vec::new();
    };

    let classes = classify(tail);
    let lead = classes
        .iter()
        .take_while(|class| **class != Token::Positional)
        .count();
    if lead == 0 || lead == tail.len() {
        return args.to_vec();
    }

    let (flags, rest) = tail.split_at(lead);
    let terminator = rest
        .iter()
        .zip(&classes[lead..])
        .position(|(token, class)| token == "--" && *class == Token::Positional)
        .unwrap_or(rest.len());

    let mut moved = Vec::with_capacity(args.len());
    moved.push(program.clone());
    moved.extend_from_slice(&rest[..terminator]);
    moved.extend_from_slice(flags);
    moved.extend_from_slice(&rest[terminator..]);
    moved
}

/// Inject command name into argument vector.
///
/// The command goes at the start of the trailing run of flags (with their
/// values), so the flags that followed the last positional token now follow
/// the injected command. When the last token is positional, the command is
/// appended at the end. When there is nothing but the program name, or
/// nothing but flags after it, the command lands right after the program name.
pub fn add_cmd_to_args(args: &[String], cmd: &str) -> Vec<String> {
    let Some((_, tail)) = args.split_first() else {
        return vec![cmd.to_string()];
    };

    let trailing = classify(tail)
        .iter()
        .rev()
        .take_while(|class| **class != Token::Positional)
        .count();

    let mut injected = args.to_vec();
    injected.insert(args.len() - trailing, cmd.to_string());
    injected
}
