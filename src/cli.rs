use crate::error::{HeartnotesError, Result};
use clap::{Parser, Subcommand};
use heartnotes_common::{BibleVersion, ColorRole, ContentType, DisplayMode, Theming};

#[derive(Parser)]
#[command(name = "heartnotes")]
#[command(about = "気持ち・手紙・思い出を読むためのビューア", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// コンテンツのベース（ディレクトリまたは http(s) URL）。設定ファイルより優先
    #[arg(long, global = true)]
    pub base: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 一覧を表示
    Index {
        /// 種別 (feelings/letters/memories)
        #[arg(required = true)]
        content_type: ContentType,

        /// グループごとに表示
        #[arg(short, long)]
        groups: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// アイテムを読み込んで表示
    Show {
        /// 種別 (feelings/letters/memories)
        #[arg(required = true)]
        content_type: ContentType,

        /// アイテムID（フォルダ名）
        #[arg(required = true)]
        id: String,

        /// 表示モード (light/dark)。省略時は保存済みの設定
        #[arg(short, long)]
        mode: Option<DisplayMode>,

        /// JSONで出力（本文は <field>Content に入る）
        #[arg(long)]
        json: bool,
    },

    /// 一覧をカード形式で表示（各アイテムの配色つき）
    Gallery {
        /// 種別 (feelings/letters/memories)
        #[arg(required = true)]
        content_type: ContentType,

        /// 表示モード (light/dark)
        #[arg(short, long)]
        mode: Option<DisplayMode>,
    },

    /// ダークモードの色を導出
    Theme {
        /// #RRGGBB。--role なしなら 背景 文字 アクセント の3色
        #[arg(required = true, num_args = 1..)]
        colors: Vec<String>,

        /// 役割 (background/text/accent)
        #[arg(short, long)]
        role: Option<ColorRole>,
    },

    /// 設定の表示・変更
    Config {
        /// コンテンツのベースを保存
        #[arg(long)]
        set_base: Option<String>,

        /// 聖書訳を保存 (NKJV/NIV/ESV/KJV/NLT)
        #[arg(long)]
        bible_version: Option<BibleVersion>,

        /// ライト/ダークを切り替えて保存
        #[arg(long)]
        toggle_mode: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// `theme` に --role なしで渡された 背景 文字 アクセント の3色
pub fn parse_palette(colors: Vec<String>) -> Result<Theming> {
    let [background, text, accent] = <[String; 3]>::try_from(colors).map_err(|colors| {
        HeartnotesError::InvalidArgument(format!(
            "--role を省略する場合は 背景 文字 アクセント の3色を指定してください（{}色が指定されました）",
            colors.len()
        ))
    })?;
    Ok(Theming::new(background, text, accent))
}
