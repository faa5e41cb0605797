//! CLI `check` command — print a configuration report. Secrets are never printed.

use anyhow::Result;

use studybot::config::StudybotConfig;

pub fn check(config: &StudybotConfig) -> Result<()> {
    let gemini = &config.gemini;
    let notion = &config.notion;

    println!("Studybot Configuration Report");
    println!("=============================");
    println!();
    println!("Server:            http://{}/", config.bind_addr());
    println!("Log level:         {}", config.server.log_level);
    println!();
    println!("Gemini:");
    println!("  Endpoint:        {}/v1/models/{}:generateText", gemini.base_url, gemini.model);
    println!("  Key slots:       {}", gemini.api_keys.len());
    println!("  Usable keys:     {}", gemini.usable_keys());
    println!("  Timeout:         {}", format_timeout(gemini.timeout_secs));
    for (slot, key) in gemini.api_keys.iter().enumerate() {
        println!("    slot {slot}:        {}", if key.is_empty() { "empty" } else { "set" });
    }
    println!();
    println!("Notion:");
    println!("  Endpoint:        {}/v1/pages", notion.base_url);
    println!("  API version:     {}", notion.version);
    println!("  API key:         {}", presence(notion.api_key.as_deref()));
    println!("  Database ID:     {}", presence(notion.database_id.as_deref()));
    println!("  Timeout:         {}", format_timeout(notion.timeout_secs));
    println!();

    match config.validate() {
        Ok(()) if notion.is_configured() => println!("Status:            OK"),
        Ok(()) => println!("Status:            OK (explanations will not be saved to Notion)"),
        Err(e) => println!("Status:            NOT READY ({e})"),
    }

    Ok(())
}

fn presence(value: Option<&str>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "set",
        _ => "missing",
    }
}

fn format_timeout(secs: Option<u64>) -> String {
    match secs {
        Some(secs) => format!("{secs}s"),
        None => "none".to_string(),
    }
}
