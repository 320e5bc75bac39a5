//! Character classes shared by the numeral and field patterns.
//!
//! These expand to string literals so they can be spliced into regex
//! sources with `concat!`.

/// One Chinese numeral or numeral-unit character.
macro_rules! numeral_class {
    () => {
        "[零〇一二三四五六七八九十百千万亿两壹贰叁肆伍陆柒捌玖拾佰仟]"
    };
}

/// An Arabic literal with an optional fractional part.
macro_rules! decimal_literal {
    () => {
        r"[0-9]+(?:\.[0-9]+)?"
    };
}

/// Currency unit markers, whole and fractional.
macro_rules! money_unit_class {
    () => {
        "[元块圆角毛分厘毫]"
    };
}

/// Keywords that may introduce a price or total.
macro_rules! price_keyword {
    () => {
        "(?:单价|价格|总价|合计|总共)"
    };
}

/// Quantity units, longest spelling first.
macro_rules! quantity_unit {
    () => {
        "平方米|立方米|公斤|千克|厘米|分米|千米|毫升|个|件|台|套|只|支|瓶|盒|箱|斤|克|吨|米|升"
    };
}
