//! xCal element names (RFC 6321).
//!
//! xCal wraps each iCalendar component in `<icalendar>` → `<vcalendar>`,
//! groups properties under `<properties>` and sub-components under
//! `<components>`, and types every property value with a value element
//! such as `<text>` or `<date-time>`.

use crate::namespace::QName;

macro_rules! xcal_tags {
    ($($fn_name:ident => $tag:literal),+ $(,)?) => {
        $(
            #[must_use]
            pub fn $fn_name() -> QName {
                QName::xcal($tag)
            }
        )+
    };
}

xcal_tags! {
    // Document structure
    icalendar => "icalendar",
    vcalendar => "vcalendar",
    properties => "properties",
    components => "components",
    parameters => "parameters",

    // Components
    vevent => "vevent",
    vtodo => "vtodo",
    vjournal => "vjournal",
    vfreebusy => "vfreebusy",
    vtimezone => "vtimezone",
    valarm => "valarm",
    standard => "standard",
    daylight => "daylight",

    // Value type elements (RFC 6321 §3.6)
    binary => "binary",
    boolean => "boolean",
    cal_address => "cal-address",
    date => "date",
    date_time => "date-time",
    duration => "duration",
    float => "float",
    integer => "integer",
    period => "period",
    recur => "recur",
    text => "text",
    time => "time",
    unknown => "unknown",
    uri => "uri",
    utc_offset => "utc-offset",

    // Period / recur children
    start => "start",
    end => "end",
    freq => "freq",
    count => "count",
    until => "until",
    interval => "interval",
    bysecond => "bysecond",
    byminute => "byminute",
    byhour => "byhour",
    byday => "byday",
    bymonthday => "bymonthday",
    byyearday => "byyearday",
    byweekno => "byweekno",
    bymonth => "bymonth",
    bysetpos => "bysetpos",
    wkst => "wkst",
}

/// ## Summary
/// Returns the xCal element name for a property or parameter, which is the
/// iCalendar name lowercased (RFC 6321 §3.2).
#[must_use]
pub fn element_for(ical_name: &str) -> QName {
    QName::xcal(ical_name.to_ascii_lowercase())
}
