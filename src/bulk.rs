use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::answer::{AnswerStore, AnswerValue};
use crate::question::QuestionBank;
use crate::Error;

/// Reads respondents from CSV.
///
/// The header is `id` followed by question ids, one respondent per row.
/// Empty cells are left unanswered. Choice cells take an option number or
/// the option text.
pub fn read_bulk<'a, R: Read + 'a>(
    bank: &'a QuestionBank,
    reader: R,
) -> Result<impl Iterator<Item = Result<(String, AnswerStore), Error>> + 'a, Error> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();
    if let Some(unknown) = headers.iter().skip(1).find(|id| bank.question(id).is_none()) {
        return Err(Error::IllegalQuestion(unknown.to_string()));
    }
    Ok(reader
        .into_records()
        .map(move |record| to_store(bank, &headers, &record?)))
}

fn to_store(
    bank: &QuestionBank,
    headers: &StringRecord,
    record: &StringRecord,
) -> Result<(String, AnswerStore), Error> {
    let id = record.get(0).unwrap_or_default().to_string();
    let mut store = AnswerStore::default();
    for (question_id, cell) in headers.iter().zip(record.iter()).skip(1) {
        if cell.is_empty() {
            continue;
        }
        let question = bank
            .question(question_id)
            .ok_or_else(|| Error::IllegalQuestion(question_id.to_string()))?;
        store.record(bank, question_id, AnswerValue::parse_for(question, cell)?)?;
    }
    Ok((id, store))
}
