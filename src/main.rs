use clap::Parser;
use heartnotes::common::{
    to_dark_mode, ColorRole, ContentLoader, ContentType, DisplayPreferences,
};
use heartnotes::{cli, config, error, logging, render, source};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use source::Source;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load()?;
    let base = cli.base.clone().unwrap_or_else(|| config.base());
    // CLIにはシステムのダークモード設定が無いので light を既定とする
    let heart_index = chrono::Utc::now().timestamp_subsec_nanos() as usize;
    let mut prefs = DisplayPreferences::load(&config, false, heart_index);

    match cli.command {
        Commands::Index { content_type, groups, json } => {
            let loader = ContentLoader::new(Source::from_base(&base)?);
            tracing::info!(%content_type, %base, "loading index");

            if groups || json {
                let manifest = loader.fetch_index_with_groups(content_type).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&manifest)?);
                } else {
                    print!("{}", render::render_grouped(&manifest));
                }
            } else {
                let items = loader.fetch_index(content_type).await?;
                print!("{}", render::render_index(&items));
            }
        }

        Commands::Show { content_type, id, mode, json } => {
            let loader = ContentLoader::new(Source::from_base(&base)?);
            if let Some(mode) = mode {
                prefs.mode = mode;
            }

            let record = if content_type == ContentType::Feelings {
                // feelings だけ一覧側のタイトルを使う
                let (index, record) = tokio::join!(
                    loader.fetch_index(content_type),
                    loader.load_content(content_type, &id)
                );
                record?.with_index_title(&index?)
            } else {
                loader.load_content(content_type, &id).await?
            };

            if json {
                let mut value = record.to_json();
                if let Some(theming) = record.theming() {
                    value["theming"] = serde_json::to_value(theming.for_mode(prefs.mode))?;
                }
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", render::render_record(content_type, &record, &prefs));
            }
        }

        Commands::Gallery { content_type, mode } => {
            let loader = ContentLoader::new(Source::from_base(&base)?);
            if let Some(mode) = mode {
                prefs.mode = mode;
            }

            let items = loader.fetch_index(content_type).await?;
            let configs = loader
                .fetch_all_configs(content_type, items.iter().map(|entry| entry.id.as_str()))
                .await;
            tracing::debug!(items = items.len(), configs = configs.len(), "gallery loaded");
            print!("{}", render::render_gallery(&items, &configs, &prefs));
        }

        Commands::Theme { colors, role } => match role {
            Some(role) => {
                for color in &colors {
                    println!("{} -> {}", color, to_dark_mode(color, role));
                }
            }
            None => {
                let theming = cli::parse_palette(colors)?;
                let dark = theming.to_dark();
                for role in ColorRole::ALL {
                    println!("{:<10} {} -> {}", role, theming.color(role), dark.color(role));
                }
            }
        },

        Commands::Config { set_base, bible_version, toggle_mode, show } => {
            let mut changed = false;

            if let Some(base) = set_base {
                config.base = base;
                changed = true;
            }
            if let Some(version) = bible_version {
                prefs.set_bible_version(version, &mut config);
                changed = true;
            }
            if toggle_mode {
                let mode = prefs.toggle_mode(&mut config);
                println!("✔ 表示モード: {}", mode);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  ベース: {}", config.base());
                println!("  表示モード: {}", prefs.mode);
                println!("  聖書訳: {}", prefs.bible_version);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
