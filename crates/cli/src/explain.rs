use crate::view::OptionView;
use serde_json::Value;
use tabled::{Table, settings::Style};
use varscope_api::models::RefactorOptions;
use varscope_core::LoadedConfig;
use varscope_core::config::options_schema;

pub fn run(config: &LoadedConfig, schema: bool) -> anyhow::Result<()> {
    if schema {
        println!("{}", serde_json::to_string_pretty(&options_schema())?);
        return Ok(());
    }

    println!("{}", Table::new(option_rows(&config.options)?).with(Style::psql()));
    if !config.options.java_version.supports_var() {
        println!(
            "java version {} does not support `var`; nothing will be eligible",
            config.options.java_version
        );
    }
    Ok(())
}

fn option_rows(options: &RefactorOptions) -> anyhow::Result<Vec<OptionView>> {
    let current = serde_json::to_value(options)?;
    let safest = serde_json::to_value(RefactorOptions::safest())?;
    let Value::Object(map) = current else {
        anyhow::bail!("options did not serialize to an object");
    };

    Ok(map
        .into_iter()
        .map(|(key, value)| OptionView {
            safest: show(&safest[&key]),
            value: show(&value),
            key,
        })
        .collect())
}

fn show(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
