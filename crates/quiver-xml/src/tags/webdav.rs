//! WebDAV element names (RFC 4918, RFC 3744 ACLs, RFC 6578 sync, RFC 4331 quota).

use crate::namespace::QName;

macro_rules! dav_tags {
    ($($fn_name:ident => $tag:literal),+ $(,)?) => {
        $(
            #[must_use]
            pub fn $fn_name() -> QName {
                QName::dav($tag)
            }
        )+
    };
}

dav_tags! {
    // RFC 4918 core
    activelock => "activelock",
    allprop => "allprop",
    collection => "collection",
    creationdate => "creationdate",
    depth => "depth",
    displayname => "displayname",
    error => "error",
    exclusive => "exclusive",
    getcontentlanguage => "getcontentlanguage",
    getcontentlength => "getcontentlength",
    getcontenttype => "getcontenttype",
    getetag => "getetag",
    getlastmodified => "getlastmodified",
    href => "href",
    include => "include",
    location => "location",
    lockdiscovery => "lockdiscovery",
    lockentry => "lockentry",
    lockroot => "lockroot",
    lockscope => "lockscope",
    locktoken => "locktoken",
    locktype => "locktype",
    multistatus => "multistatus",
    owner => "owner",
    prop => "prop",
    propertyupdate => "propertyupdate",
    propfind => "propfind",
    propname => "propname",
    propstat => "propstat",
    remove => "remove",
    resourcetype => "resourcetype",
    response => "response",
    responsedescription => "responsedescription",
    set => "set",
    shared => "shared",
    status => "status",
    supportedlock => "supportedlock",
    timeout => "timeout",
    write => "write",

    // RFC 3744 access control
    ace => "ace",
    acl => "acl",
    all => "all",
    authenticated => "authenticated",
    bind => "bind",
    current_user_principal => "current-user-principal",
    current_user_privilege_set => "current-user-privilege-set",
    deny => "deny",
    grant => "grant",
    group_membership => "group-membership",
    inherited => "inherited",
    invert => "invert",
    principal => "principal",
    principal_url => "principal-URL",
    privilege => "privilege",
    protected => "protected",
    read => "read",
    read_acl => "read-acl",
    read_current_user_privilege_set => "read-current-user-privilege-set",
    self_tag => "self",
    unauthenticated => "unauthenticated",
    unbind => "unbind",
    unlock => "unlock",
    write_acl => "write-acl",
    write_content => "write-content",
    write_properties => "write-properties",

    // RFC 6578 collection synchronization
    sync_collection => "sync-collection",
    sync_level => "sync-level",
    sync_token => "sync-token",

    // RFC 4331 quota
    quota_available_bytes => "quota-available-bytes",
    quota_used_bytes => "quota-used-bytes",

    // RFC 3253 reports
    expand_property => "expand-property",
    supported_report => "supported-report",
    supported_report_set => "supported-report-set",
}
