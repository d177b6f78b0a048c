//! Range and shot commands

use crate::cli::error::HelpfulError;
use crate::cli::output::print_json;
use assetlane::naming::shot_list;
use assetlane::{expand_range, shot_number_for, shot_string_for, NamingGrammar};

pub fn run_range(expression: &str, json: bool) -> anyhow::Result<()> {
    let numbers = expand_range(expression)?;
    if json {
        return print_json(&numbers);
    }
    let joined: Vec<String> = numbers.iter().map(u32::to_string).collect();
    println!("{}", joined.join(" "));
    Ok(())
}

pub fn run_shots(expression: &str, json: bool, grammar: &NamingGrammar) -> anyhow::Result<()> {
    let shots = shot_list(grammar, expression)?;
    if json {
        return print_json(&shots);
    }
    for shot in shots {
        println!("{}", shot);
    }
    Ok(())
}

pub fn run_shot(token: &str, grammar: &NamingGrammar) -> anyhow::Result<()> {
    let shot = shot_string_for(grammar, token).ok_or_else(|| HelpfulError::no_shot_number(token))?;
    println!("{}", shot);
    Ok(())
}

pub fn run_shot_number(shot: &str, grammar: &NamingGrammar) -> anyhow::Result<()> {
    let number = shot_number_for(grammar, shot).ok_or_else(|| HelpfulError::no_shot_number(shot))?;
    println!("{}", number);
    Ok(())
}
