use anyhow::{Context, Result};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// `-v`の回数からログレベルを決める。
fn level_for(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// 標準エラー出力にログを出すように初期化する。
///
/// 標準出力はプログレスバーなどの表示に使うため、ログは標準エラー出力に分ける。
///
/// # Arguments
///
/// * `verbosity` - `-v`が指定された回数
pub fn init(verbosity: u64) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level_for(verbosity))
        .chain(std::io::stderr())
        .apply()
        .context("Failed to initialize logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;
    use rstest::rstest;

    use super::level_for;

    #[rstest]
    #[case::quiet(0, LevelFilter::Info)]
    #[case::verbose(1, LevelFilter::Debug)]
    #[case::very_verbose(2, LevelFilter::Trace)]
    #[case::more(5, LevelFilter::Trace)]
    fn test_level_for(#[case] verbosity: u64, #[case] expected: LevelFilter) {
        assert_eq!(level_for(verbosity), expected);
    }
}
