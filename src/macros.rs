#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// `includes!["#a", "#b"]`: a list of reference rules.
#[macro_export]
macro_rules! includes {
    ( $($inc:expr),* $(,)? ) => {
        vec![ $($crate::Rule::include($inc)),* ]
    };
}

/// `captures!{ 1 => "keyword", 2 => "variable" }`: name-only capture rules.
#[macro_export]
macro_rules! captures {
    ( $($idx:literal => $name:expr),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut captures = $crate::Captures::new();
        $( captures.insert($idx, $crate::Capture::named($name)); )*
        captures
    }};
}

#[macro_export]
macro_rules! leaf {
    (
        match: $pat:expr
        $(, captures: { $($idx:literal => $cap:expr),* $(,)? })?
        $(, name: $name:expr)?
        $(,)?
    ) => {{
        $crate::Rule::Match($crate::MatchRule {
            pattern: ::std::string::String::from($pat),
            captures: $crate::captures!{ $($($idx => $cap),*)? },
            name: { None $(.or(Some(::std::string::String::from($name))))? },
        })
    }};
}

#[macro_export]
macro_rules! region {
    (
        begin: $begin:expr
        $(, begin_captures: { $($bidx:literal => $bcap:expr),* $(,)? })?
        , end: $end:expr
        $(, end_captures: { $($eidx:literal => $ecap:expr),* $(,)? })?
        $(, captures: { $($idx:literal => $cap:expr),* $(,)? })?
        $(, content_name: $content:expr)?
        $(, patterns: $patterns:expr)?
        $(, name: $name:expr)?
        $(,)?
    ) => {{
        $crate::Rule::Region($crate::RegionRule {
            begin: ::std::string::String::from($begin),
            begin_captures: $crate::captures!{ $($($bidx => $bcap),*)? },
            end: ::std::string::String::from($end),
            end_captures: $crate::captures!{ $($($eidx => $ecap),*)? },
            captures: $crate::captures!{ $($($idx => $cap),*)? },
            content_name: { None $(.or(Some(::std::string::String::from($content))))? },
            patterns: { None $(.or(Some($patterns)))? }.unwrap_or_default(),
            name: { None $(.or(Some(::std::string::String::from($name))))? },
        })
    }};
}

#[macro_export]
macro_rules! group {
    (
        patterns: $patterns:expr
        $(, name: $name:expr)?
        $(,)?
    ) => {{
        $crate::Rule::Group($crate::GroupRule {
            patterns: $patterns,
            name: { None $(.or(Some(::std::string::String::from($name))))? },
        })
    }};
}
