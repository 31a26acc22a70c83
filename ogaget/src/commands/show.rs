use ogaget_format::{CreditFormat, Parsed, Record};
use serde::Serialize;

use crate::cli::ShowArgs;
use crate::error::{Error, Result};

#[derive(Serialize)]
struct JsonCredit<'a> {
    keys: &'a [String],
    record: &'a Record,
}

pub fn run(args: ShowArgs, format: &CreditFormat) -> Result<()> {
    let parsed = ogaget_format::parse(&args.credit, format).map_err(|source| Error::ReadCredit {
        path: args.credit.clone(),
        source,
    })?;

    if args.json {
        return show_json(&parsed);
    }

    let text = ogaget_format::to_string(&parsed.record, &parsed.ordered_keys, format)
        .map_err(|source| Error::ReadCredit {
            path: args.credit.clone(),
            source,
        })?;
    print!("{}", text);
    Ok(())
}

fn show_json(parsed: &Parsed) -> Result<()> {
    let credit = JsonCredit {
        keys: &parsed.ordered_keys,
        record: &parsed.record,
    };
    let json = serde_json::to_string_pretty(&credit).map_err(|source| Error::Json { source })?;
    println!("{}", json);
    Ok(())
}
