use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use omr_sheet::constants::pt_to_mm;
use omr_sheet::{
    DEFAULT_BANGLA_FONT_PATH, FontRegistry, GridGeometry, PaperSize, SheetLayout, SheetRequest,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "omr", about = "OMR answer sheet tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an answer sheet to a PDF file
    Generate {
        /// Institute name printed as the title
        #[arg(long)]
        institute: String,

        /// Number of questions
        #[arg(short, long)]
        questions: usize,

        /// Answer options per question (2-6)
        #[arg(long, default_value = "4")]
        options: usize,

        /// Use Bengali letters and numerals
        #[arg(long)]
        bangla: bool,

        /// TrueType font with Bengali glyphs
        #[arg(long, default_value = DEFAULT_BANGLA_FONT_PATH)]
        font: PathBuf,

        /// Paper size (ignored when --layout is given)
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// JSON layout file
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Output PDF file
        #[arg(short, long, default_value = "omr_sheet.pdf")]
        output: PathBuf,
    },

    /// Show the grid geometry for a question count without rendering
    Layout {
        /// Number of questions
        #[arg(short, long)]
        questions: usize,

        /// Paper size (ignored when --layout is given)
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// JSON layout file
        #[arg(long)]
        layout: Option<PathBuf>,
    },

    /// Write the default layout as JSON, ready for editing
    InitLayout {
        /// Output JSON file
        #[arg(short, long, default_value = "layout.json")]
        output: PathBuf,

        /// Paper size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
    Legal,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

async fn resolve_layout(layout: Option<&Path>, paper: PaperArg) -> Result<SheetLayout> {
    let layout = match layout {
        Some(path) => SheetLayout::load(path).await?,
        None => SheetLayout {
            paper: paper.into(),
            ..Default::default()
        },
    };
    layout.validate()?;
    Ok(layout)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            institute,
            questions,
            options,
            bangla,
            font,
            paper,
            layout,
            output,
        } => {
            let layout = resolve_layout(layout.as_deref(), paper).await?;
            let request = SheetRequest::new(institute, questions, options, bangla);
            request.validate()?;

            // Registration logs its own fallback warning
            let fonts = FontRegistry::new();
            if bangla {
                fonts.register_bangla(&font);
            }

            omr_sheet::generate_pdf(&request, &layout, fonts.bangla_font(), &output).await?;
            println!(
                "Generated {} questions × {} options → {}",
                questions,
                options,
                output.display()
            );
        }

        Commands::Layout {
            questions,
            paper,
            layout,
        } => {
            let layout = resolve_layout(layout.as_deref(), paper).await?;
            let geometry = GridGeometry::new(questions, &layout);
            println!("Sheet Layout ({}):", layout.paper.name());
            println!("  Questions: {}", geometry.total_questions);
            println!("  Questions per column: {}", geometry.questions_per_column);
            println!(
                "  Column width: {:.1}pt ({:.1}mm)",
                geometry.column_width_pt,
                pt_to_mm(geometry.column_width_pt)
            );
            println!("  Rows per page: {}", geometry.rows_per_page);
            println!("  Pages: {}", geometry.pages);
        }

        Commands::InitLayout { output, paper } => {
            let layout = SheetLayout {
                paper: paper.into(),
                ..Default::default()
            };
            layout.validate()?;
            layout.save(&output).await?;
            println!("Wrote layout → {}", output.display());
        }
    }

    Ok(())
}
