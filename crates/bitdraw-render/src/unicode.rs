//! The Unicode/UTF-8 code chart as a XeLaTeX document.
//!
//! Every block of 128 code points becomes one table of 8 columns and 16
//! rows. A cell shows the code point, its UTF-8 bytes in hex and the glyph
//! itself, or a grey box with the name of a control code.

use std::io::Write;

use bitdraw::encoding::table_hex;
use tracing::debug;

use crate::errors::RenderError;

/// Number of 128-code-point blocks in the default chart (up to U+2CFF).
pub const DEFAULT_BLOCKS: u32 = 0x5A;

const PREAMBLE: &str = r"%!TEX TS-program = xetex
%!TEX encoding = UTF-8 Unicode
\documentclass{article}
\usepackage{xunicode}
\usepackage{fontspec}
\usepackage{xltxtra}
\usepackage{colortbl}
\setromanfont[Mapping=tex-text]{FreeSerif}
\definecolor{grau1}{rgb}{0.7,0.7,0.7}
\definecolor{grau2}{rgb}{0.9,0.9,0.9}
\definecolor{cc}{rgb}{0.7,0.7,0.7}
\begin{document}
\pagestyle{empty}
\newcommand{\PreserveBackslash}[1]{\let\temp=\\#1\let\\=\temp}
\renewcommand{\arraystretch}{0.8}
";

const CELL: &str = r"|>{\PreserveBackslash\centering}p{12mm}";

/// Short name printed instead of the glyph for code points without a
/// visible rendering.
pub fn control_name(cp: u32) -> Option<&'static str> {
    const C0: [&str; 32] = [
        "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "HT", "LF", "VT", "FF", "CR",
        "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM", "SUB",
        "ESC", "FS", "GS", "RS", "US",
    ];
    const C1: [&str; 32] = [
        "XXX", "XXX", "BPH", "NBH", "IND", "NEL", "SSA", "ESA", "HTS", "HTJ", "VTS", "PLD", "PLU",
        "RI", "SS2", "SS3", "DCS", "PU1", "PU2", "STS", "CCH", "MW", "SPA", "EPA", "SOS", "XXX",
        "SCI", "CSI", "ST", "OSC", "PM", "APC",
    ];

    match cp {
        0x00..=0x1F => Some(C0[cp as usize]),
        0x20 => Some("SP"),
        0x7F => Some("DEL"),
        0x80..=0x9F => Some(C1[(cp - 0x80) as usize]),
        0xA0 => Some("NBSP"),
        0xAD => Some("SHY"),
        _ => None,
    }
}

/// Writes the complete document with `blocks` tables.
pub fn write_table<W: Write>(w: &mut W, blocks: u32) -> Result<(), RenderError> {
    w.write_all(PREAMBLE.as_bytes())?;
    for block in 0..blocks {
        write_block(w, block)?;
    }
    w.write_all(b"\\end{document}\n")?;

    debug!(blocks, "wrote unicode table");
    Ok(())
}

/// Writes the table for code points `block << 7 ..= (block << 7) | 0x7F`.
pub fn write_block<W: Write>(w: &mut W, block: u32) -> Result<(), RenderError> {
    writeln!(w, "\\noindent\n\\begin{{tabular}}{{{}|}}\n\\hline", CELL.repeat(8))?;

    for row in 0..16 {
        let cps = (0..8).map(|col| block << 7 | col << 4 | row);

        w.write_all(b"\\rowcolor{grau1}\n")?;
        for (col, cp) in cps.clone().enumerate() {
            write!(w, "{{\\footnotesize\\sffamily U+{cp:04X}}} {}", cell_end(col, false))?;
        }

        w.write_all(b"\\rowcolor{grau2}\n")?;
        for (col, cp) in cps.clone().enumerate() {
            let hex = table_hex(cp).unwrap_or_default();
            write!(w, "{{\\footnotesize\\sffamily {hex}}} {}", cell_end(col, false))?;
        }

        w.write_all(b"\\vrule width 0pt height 5mm depth 2mm\n")?;
        for (col, cp) in cps.enumerate() {
            match control_name(cp) {
                Some(name) => write!(w, "\\colorbox{{cc}}{{{name}}} {}", cell_end(col, true))?,
                None => write!(w, "\\symbol{{{cp}}} {}", cell_end(col, true))?,
            }
        }
    }

    w.write_all(b"\\end{tabular}\n\n")?;
    Ok(())
}

fn cell_end(col: usize, last_line: bool) -> &'static str {
    match (col, last_line) {
        (7, false) => "\\\\\n",
        (7, true) => "\\\\\\hline\n",
        _ => " &\n",
    }
}
