//! CalDAV element names (RFC 4791, RFC 6638 scheduling).

use crate::namespace::QName;

macro_rules! caldav_tags {
    ($($fn_name:ident => $tag:literal),+ $(,)?) => {
        $(
            #[must_use]
            pub fn $fn_name() -> QName {
                QName::caldav($tag)
            }
        )+
    };
}

caldav_tags! {
    // RFC 4791 core
    calendar => "calendar",
    calendar_data => "calendar-data",
    calendar_description => "calendar-description",
    calendar_home_set => "calendar-home-set",
    calendar_multiget => "calendar-multiget",
    calendar_query => "calendar-query",
    calendar_timezone => "calendar-timezone",
    comp => "comp",
    comp_filter => "comp-filter",
    expand => "expand",
    filter => "filter",
    free_busy_query => "free-busy-query",
    is_not_defined => "is-not-defined",
    limit_freebusy_set => "limit-freebusy-set",
    limit_recurrence_set => "limit-recurrence-set",
    max_attendees_per_instance => "max-attendees-per-instance",
    max_date_time => "max-date-time",
    max_instances => "max-instances",
    max_resource_size => "max-resource-size",
    min_date_time => "min-date-time",
    mkcalendar => "mkcalendar",
    param_filter => "param-filter",
    prop_filter => "prop-filter",
    supported_calendar_component_set => "supported-calendar-component-set",
    supported_calendar_data => "supported-calendar-data",
    supported_collation_set => "supported-collation-set",
    text_match => "text-match",
    time_range => "time-range",
    timezone => "timezone",

    // RFC 6638 scheduling
    calendar_user_address_set => "calendar-user-address-set",
    calendar_user_type => "calendar-user-type",
    schedule_calendar_transp => "schedule-calendar-transp",
    schedule_default_calendar_url => "schedule-default-calendar-URL",
    schedule_inbox => "schedule-inbox",
    schedule_inbox_url => "schedule-inbox-URL",
    schedule_outbox => "schedule-outbox",
    schedule_outbox_url => "schedule-outbox-URL",
    schedule_response => "schedule-response",
    schedule_tag => "schedule-tag",
}
