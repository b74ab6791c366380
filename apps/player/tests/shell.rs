//! Shell round trips: commands in, JSON lines out.

mod common;

use serde_json::Value;

use common::TestContext;
use unit_player::commands;
use unit_player::shell::run_shell;

fn run(ctx: &TestContext, script: &str) -> Vec<Value> {
    let mut state = ctx.state();
    commands::load_unit(&mut state, "unit1").unwrap();

    let mut output = Vec::new();
    run_shell(&mut state, script.as_bytes(), &mut output).unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn place_and_check_through_shell() {
    let ctx = TestContext::with_units(&["unit1"]);
    let responses = run(
        &ctx,
        "place vocab 1 fire\nplace vocab 3 blaze\n# comment\n\ncheck vocab\n",
    );

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["status"], "placed");
    assert_eq!(responses[0]["display"], "fire");
    assert_eq!(responses[2]["score"]["correct"], 2);
    assert_eq!(responses[2]["percent"], 67);
    assert_eq!(responses[2]["grade"]["items"][1]["verdict"], "missing");
    assert_eq!(responses[2]["grade"]["items"][1]["expected"], "ignite");
}

#[test]
fn rejected_placement_is_a_value_not_an_error() {
    let ctx = TestContext::with_units(&["unit1"]);
    let responses = run(&ctx, "place sevenFive 1 a\nplace sevenFive 2 a\n");

    assert_eq!(responses[1]["status"], "rejected");
    assert_eq!(responses[1]["reason"], "option_consumed");
}

#[test]
fn errors_and_usage_are_reported() {
    let ctx = TestContext::with_units(&["unit1"]);
    let responses = run(&ctx, "check essay\nplace vocab\nload nowhere\n");

    assert_eq!(responses[0]["error"], "unknown_exercise");
    assert_eq!(responses[1]["error"], "usage");
    assert_eq!(responses[2]["error"], "not_found");
}

#[test]
fn quit_stops_reading() {
    let ctx = TestContext::with_units(&["unit1"]);
    let responses = run(&ctx, "fill cloze 1 London\nquit\nfill cloze 2 dark\n");

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["value"], "London");
}

#[test]
fn quoted_multi_word_answers() {
    let ctx = TestContext::with_units(&["unit1"]);
    let responses = run(&ctx, "fill grammar 1 \"was not\"\nstatus grammar\n");

    assert_eq!(responses[0]["value"], "was not");
    assert_eq!(responses[1]["answers"]["1"], "was not");
}
