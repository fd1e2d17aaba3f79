use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;
use strum::IntoEnumIterator as _;

use crate::judge::{Report, TestResult, Verdict, VerdictCode};

const BOLD_LINE: &str = "━";
const THIN_LINE: &str = "─";

pub fn is_truecolor_supported() -> bool {
    matches!(
        std::env::var("COLORTERM").as_deref(),
        Ok("truecolor") | Ok("24bit")
    )
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for VerdictCode {
    fn color(&self) -> Color {
        use VerdictCode::*;
        if !self::is_truecolor_supported() {
            return match self {
                AC => Color::Green,
                WA => Color::Yellow,
                TLE => Color::Red,
                RE => Color::Magenta,
                IE => Color::BrightBlack,
            };
        }

        match self {
            AC => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            WA => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
            TLE => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
            RE => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
            IE => Color::TrueColor {
                r: 128,
                g: 128,
                b: 128,
            },
        }
    }
}

pub fn judge_icon(code: VerdictCode) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {} ", code).on_color(code.color()).bold().color(fg)
}

pub fn print_report_summary(report: &Report) {
    let bar = "-".repeat(5);
    print!("{} ", bar);

    let total = report.total();
    let passed = report.passed();

    if passed == total {
        let msg = format!("All {} tests passed ✨", total);
        print!("{}", msg.green());
    } else {
        let summary_msg = if passed > 0 {
            format!("{}/{} tests failed 💣", total - passed, total)
        } else {
            format!("All {} tests failed 💀", total)
        };

        let count = report.count_by_code();
        let detail_msg = VerdictCode::iter()
            .filter(|&code| code != VerdictCode::AC)
            .filter_map(|code| count.get(&code).map(|&cnt| (code, cnt)))
            .map(|(code, cnt)| {
                format!(
                    "{}{}{}",
                    self::judge_icon(code),
                    "x".dimmed(),
                    cnt.to_string().bold().bright_white(),
                )
            })
            .collect::<Vec<String>>()
            .join(", ");

        print!("{} ({})", summary_msg.bright_red(), detail_msg);
    }

    println!(" {}", bar);
}

pub fn print_test_result_detail(res: &TestResult) {
    let (cols, _) = terminal::size().unwrap_or((40, 40));
    let cols = cols as usize;

    let bold_bar = BOLD_LINE.repeat(cols).blue().bold();

    println!(
        "\n{}: {} [{}ms]\n{}",
        res.name.color(Color::BrightYellow).bold(),
        self::judge_icon(res.verdict.code()),
        res.time.as_millis(),
        bold_bar,
    );

    if let Verdict::IE(detail) = &res.verdict {
        println!("{}", detail.bright_red());
    }

    print_section("[input]", &res.input, cols, false);
    print_section("[expected]", &res.expected, cols, true);
    print_section("[stdout]", &res.stdout, cols, true);

    if !res.stderr.is_empty() {
        print_sub_title("[stderr]", cols);
        print!("{}", res.stderr);
        if !res.stderr.ends_with('\n') {
            println!();
        }
    }

    if let Some(explanation) = &res.explanation {
        print_sub_title("[explanation]", cols);
        println!("{}", explanation);
    }

    println!("{}", bold_bar);
}

fn print_sub_title(s: &str, cols: usize) {
    println!(
        "{}{}",
        s.cyan().bold(),
        THIN_LINE.repeat(cols.saturating_sub(s.len() + 1)).bright_black(),
    )
}

/// Prints one output block. With `annotate`, trailing whitespace and a missing
/// final newline are highlighted since they are invisible otherwise (and never
/// affect the verdict).
fn print_section(title: &str, text: &str, cols: usize, annotate: bool) {
    print_sub_title(title, cols);

    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        println!("{}", "<EMPTY>".magenta().dimmed());
        return;
    }

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim_end();
        print!("{}", trimmed);

        if annotate {
            let num_trailing_whitespace = line.len() - trimmed.len();
            if num_trailing_whitespace > 0 {
                print!(
                    "{}{}",
                    " ".repeat(num_trailing_whitespace).on_red(),
                    "(Trailing whitespace)".bright_red().bold()
                );
            }

            let is_last_line = i + 1 == lines.len();
            if is_last_line && !text.ends_with('\n') {
                print!("{}", " Missing new line ".on_yellow().black().bold());
            }
        }

        println!();
    }
}
