//! Template renderer
//!
//! Walks the template once. Literal runs are copied as-is; each `%` hands
//! the bytes after it to the directive scanner and dispatches on the result.
//! Flags, width, precision, length and case are parsed but not applied.

use crate::args::ArgCursor;
use crate::config::{INVALID_PLACEHOLDER, NULL_STRING};
use crate::cursor::RenderCursor;
use crate::directive::{self, ConversionType};
use crate::numfmt::{self, DecBuf, HexBuf};

/// Introduces a directive
pub const DIRECTIVE_MARKER: u8 = b'%';

/// Renders `template` into `out`, pulling arguments from `args`
///
/// The template ends at its first NUL or at the end of the slice. Returns
/// the number of bytes written, terminator excluded. Truncated output is
/// indistinguishable from output that fit exactly.
pub fn render(mut out: RenderCursor<'_>, template: &[u8], args: &mut ArgCursor<'_>) -> usize {
    let end = template.iter().position(|&b| b == 0).unwrap_or(template.len());
    let mut rest = &template[..end];

    while !rest.is_empty() {
        let literal_len = rest
            .iter()
            .position(|&b| b == DIRECTIVE_MARKER)
            .unwrap_or(rest.len());
        out.put_bytes(&rest[..literal_len]);
        rest = &rest[literal_len..];

        if let Some((_, body)) = rest.split_first() {
            let (directive, consumed) = directive::scan(body);
            rest = &body[consumed..];
            render_directive(&mut out, directive.conversion, args);
        }
    }

    out.finish()
}

fn render_directive(out: &mut RenderCursor<'_>, conversion: ConversionType, args: &mut ArgCursor<'_>) {
    match conversion {
        ConversionType::Percent => {
            out.put_byte(DIRECTIVE_MARKER);
        }
        ConversionType::Str => {
            let s = args.next_str().unwrap_or(NULL_STRING);
            out.put_bytes(s);
        }
        ConversionType::SignedInt => {
            let mut buf = DecBuf::default();
            out.put_bytes(numfmt::format_i32(args.next_word() as i32, &mut buf));
        }
        ConversionType::UnsignedInt => {
            let mut buf = DecBuf::default();
            out.put_bytes(numfmt::format_u32(args.next_word(), &mut buf));
        }
        ConversionType::Hex | ConversionType::Pointer => {
            let mut buf = HexBuf::default();
            out.put_bytes(numfmt::format_hex(args.next_word(), &mut buf));
        }
        ConversionType::Invalid
        | ConversionType::Octal
        | ConversionType::Float
        | ConversionType::Scientific
        | ConversionType::Shortest
        | ConversionType::HexFloat
        | ConversionType::Char
        | ConversionType::StoreCount => {
            // Skip one slot so later directives stay aligned
            args.next_word();
            out.put_bytes(INVALID_PLACEHOLDER);
        }
    }
}
