use appendlike::{AppendTo, Appendable, AppendableLike, IoAppendable};

#[derive(AppendTo)]
#[append_to(separator = " ", suffix = "\n")]
struct LogLine {
    level: Level,
    #[append_to(skip)]
    sequence: u64,
    message: String,
}

#[derive(AppendTo)]
enum Level {
    #[append_to(rename = "INFO")]
    Info,
    #[append_to(rename = "WARN")]
    Warn,
}

fn main() -> Result<(), appendlike::AppendError> {
    let lines = [
        LogLine {
            level: Level::Info,
            sequence: 1,
            message: "starting".to_string(),
        },
        LogLine {
            level: Level::Warn,
            sequence: 2,
            message: "disk almost full".to_string(),
        },
    ];

    // A String is a fast sink: numbers go straight into it.
    let mut report = String::new();
    let mut like = AppendableLike::new(&mut report);
    for line in lines.iter() {
        like.append_i64(line.sequence as i64)?.append(": ")?;
        line.append_to(&mut like)?;
    }
    like.append_serializable(None)?;
    println!("{report}");

    // Any io::Write works through the generic path.
    let mut stdout = std::io::stdout();
    let mut sink = IoAppendable(&mut stdout);
    for line in lines.iter() {
        sink.append_value(line)?;
    }
    Ok(())
}
