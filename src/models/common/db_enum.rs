/// 定义以大写名称落库的枚举
///
/// 自动生成：
/// - enum 定义（JSON 中使用 snake_case）
/// - ALL 常量 - 枚举的全部取值
/// - as_str() 方法 - 返回落库字符串
/// - Display / FromStr - 与落库字符串互转，未知取值返回错误
macro_rules! define_db_enum {
    (
        $(#[$meta:meta])*
        $name:ident($label:literal) {
            $($variant:ident => $db:literal),* $(,)?
        }
    ) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            ts_rs::TS,
        )]
        #[serde(rename_all = "snake_case")]
        $(#[$meta])*
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $db,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($db => Ok($name::$variant),)*
                    _ => Err(format!("Invalid {}: {s}", $label)),
                }
            }
        }
    };
}

pub(crate) use define_db_enum;
