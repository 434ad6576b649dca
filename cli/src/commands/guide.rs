use anyhow::Result;

use hydro_core::guide::{ARTICLES, article};

use super::helpers::print_json;

/// Without a topic, list the articles; with one, print it in full.
pub(crate) fn cmd_guide(topic: Option<&str>, json: bool) -> Result<()> {
    let Some(topic) = topic else {
        if json {
            return print_json(&ARTICLES);
        }
        println!("Growing guide:\n");
        for a in &ARTICLES {
            println!("  {:<10} {}", a.id, a.title);
        }
        println!("\nRead one with `hydro guide <topic>`.");
        return Ok(());
    };

    let a = article(topic)?;
    if json {
        return print_json(a);
    }
    println!("=== {} ===\n", a.title);
    println!("{}", a.body);
    Ok(())
}
