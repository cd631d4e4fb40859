macro_rules! simple_enum {
    (#[derive($($der:ident),*)] $enum_name:ident { $($field_name:ident),* }) => {
        #[derive($($der),*)]
        pub enum $enum_name {
            $( $field_name , )*
        }

        impl $enum_name {
            /// Every variant, lowest first.
            pub const VALUES: &'static [$enum_name] = &[ $( $enum_name::$field_name , )* ];
        }
    };
}

macro_rules! glyph_map {
    ( $( $glyph:expr => $canonical:expr ),* $(,)? ) => {
        {
            let mut map = HashMap::new();
            $(
                map.insert($glyph, $canonical);
            )*
            map
        }
    };
}
