//! Mana pip tokens → Discord emoji codes.

/// Ordered longest token first so a prefix can never shadow a longer match.
const PIPS: &[(&str, &str)] = &[
    ("{10}", ":keycap_ten:"),
    ("{X}", ":regional_indicator_x:"),
    ("{1}", ":one:"),
    ("{2}", ":two:"),
    ("{3}", ":three:"),
    ("{4}", ":four:"),
    ("{5}", ":five:"),
    ("{6}", ":six:"),
    ("{7}", ":seven:"),
    ("{8}", ":eight:"),
    ("{9}", ":nine:"),
    ("{W}", ":white_circle:"),
    ("{R}", ":red_circle:"),
    ("{B}", ":black_circle:"),
    ("{U}", ":large_blue_circle:"),
    ("{G}", ":nauseated_face:"),
    ("{C}", ":nauseated_face:"),
];

/// Replace every pip token in `text` in a single left-to-right pass.
///
/// Emitted emoji codes are never scanned again. Unknown `{...}` sequences
/// are copied through untouched.
pub fn substitute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match PIPS.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, emoji)) => {
                out.push_str(emoji);
                rest = &tail[token.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
