//! Offline help: the FAQ and house tips

use anyhow::Result;
use colored::Colorize;
use estimator_lib::advisory::{random_tip, FaqQuestion};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_info, print_table, OutputFormat};

#[derive(Tabled, Serialize)]
struct QuestionRow {
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Question")]
    question: &'static str,
}

#[derive(Serialize)]
struct Answer {
    id: &'static str,
    question: &'static str,
    answer: &'static str,
}

/// Clap value parser for question ids
pub fn parse_question(raw: &str) -> Result<FaqQuestion, String> {
    raw.parse::<FaqQuestion>().map_err(|_| {
        let ids: Vec<&str> = FaqQuestion::ALL.iter().map(|q| q.id()).collect();
        format!("unknown question '{}', expected one of: {}", raw, ids.join(", "))
    })
}

/// Answer one question, or list them all
pub fn ask(question: Option<FaqQuestion>, format: OutputFormat) -> Result<()> {
    let Some(question) = question else {
        let rows: Vec<QuestionRow> = FaqQuestion::ALL
            .iter()
            .map(|q| QuestionRow {
                id: q.id(),
                question: q.question(),
            })
            .collect();
        print_table(&rows, format);
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let answer = Answer {
                id: question.id(),
                question: question.question(),
                answer: question.answer(),
            };
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
        OutputFormat::Table => {
            println!("{}", question.question().bold());
            println!("{}", question.answer());
        }
    }

    Ok(())
}

/// Print one of the house tips
pub fn tip(format: OutputFormat) -> Result<()> {
    let tip = random_tip();
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "tip": tip })),
        OutputFormat::Table => print_info(tip),
    }
    Ok(())
}
