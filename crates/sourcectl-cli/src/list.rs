use nu_ansi_term::Color::{Blue, Cyan, Green};
use sourcectl_core::{CommandRunner, Source, SourceManager, SourceResult, SourceTableParser};
use tabled::{
    builder::Builder,
    settings::{peaker::PriorityMax, themes::BorderCorrection, Panel, Style, Width},
};
use tracing::{debug, info};

use crate::utils::{term_width, Colored};

pub fn list_sources<R, P>(manager: &SourceManager<R, P>, json: bool) -> SourceResult<()>
where
    R: CommandRunner,
    P: SourceTableParser,
{
    let sources = manager.list_sources()?;
    debug!(count = sources.len(), "rendering sources");

    if json {
        println!("{}", render_json(&sources)?);
        return Ok(());
    }

    if sources.is_empty() {
        info!("No sources configured");
        return Ok(());
    }

    info!("\n{}", render_table(&sources));
    Ok(())
}

fn render_json(sources: &[Source]) -> SourceResult<String> {
    Ok(serde_json::to_string_pretty(sources)?)
}

fn render_table(sources: &[Source]) -> String {
    let mut builder = Builder::new();
    builder.push_record(["Name".to_string(), "Argument".to_string()]);
    for source in sources {
        builder.push_record([
            Colored(Blue, &source.name).to_string(),
            Colored(Cyan, &source.url).to_string(),
        ]);
    }

    builder
        .build()
        .with(Panel::header(format!(
            "Sources ({})",
            Colored(Green, sources.len())
        )))
        .with(Style::rounded())
        .with(BorderCorrection {})
        .with(Width::wrap(term_width()).priority(PriorityMax::default()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::utils::COLOR;

    #[test]
    fn test_render_json_keeps_order_and_fields() {
        let json = render_json(&[
            Source::new("msstore", "https://storeedgefd.dsx.mp.microsoft.com/v9.0"),
            Source::new("winget", "https://cdn.winget.microsoft.com/cache"),
        ])
        .unwrap();

        let parsed: Vec<Source> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "msstore");
        assert_eq!(parsed[1].url, "https://cdn.winget.microsoft.com/cache");
        assert!(json.contains("\"name\": \"winget\""));
    }

    #[test]
    fn test_render_json_empty_list() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }

    #[test]
    #[serial]
    fn test_render_table_contains_every_source() {
        *COLOR.write().unwrap() = false;

        let table = render_table(&[
            Source::new("msstore", "https://storeedgefd.dsx.mp.microsoft.com/v9.0"),
            Source::new("winget", "https://cdn.winget.microsoft.com/cache"),
        ]);

        assert!(table.contains("Sources (2)"));
        assert!(table.contains("msstore"));
        assert!(table.contains("https://cdn.winget.microsoft.com/cache"));
        assert!(table.find("msstore") < table.find("winget"));

        *COLOR.write().unwrap() = true;
    }
}
