//! CardDAV element names (RFC 6352).

use crate::namespace::QName;

macro_rules! carddav_tags {
    ($($fn_name:ident => $tag:literal),+ $(,)?) => {
        $(
            #[must_use]
            pub fn $fn_name() -> QName {
                QName::carddav($tag)
            }
        )+
    };
}

carddav_tags! {
    address_data => "address-data",
    address_data_type => "address-data-type",
    addressbook => "addressbook",
    addressbook_description => "addressbook-description",
    addressbook_home_set => "addressbook-home-set",
    addressbook_multiget => "addressbook-multiget",
    addressbook_query => "addressbook-query",
    allof => "allof",
    anyof => "anyof",
    directory_gateway => "directory-gateway",
    filter => "filter",
    is_not_defined => "is-not-defined",
    limit => "limit",
    max_resource_size => "max-resource-size",
    nresults => "nresults",
    param_filter => "param-filter",
    principal_address => "principal-address",
    prop_filter => "prop-filter",
    supported_address_data => "supported-address-data",
    supported_collation_set => "supported-collation-set",
    text_match => "text-match",
}
