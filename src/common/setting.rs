//! setting config file
//! 配置文件按 `config_{ENV}.toml` 命名，找不到时退回内置默认值

use std::{fs::File, io::Read};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct Meta {
    pub application_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Env {
    pub debug: bool,
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Mqtt {
    /// 显式通道地址，留空时按 host/secure 推导
    #[serde(default)]
    pub endpoint: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 宿主页面是否为安全传输
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_client_id_prefix")]
    pub client_id_prefix: String,
    /// 启动时订阅的主题
    #[serde(default)]
    pub topics: Vec<String>,
}

fn default_port() -> u16 {
    8083
}

fn default_client_id_prefix() -> String {
    String::from("web")
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub meta: Meta,
    pub env: Env,
    pub mqtt: Mqtt,
}

impl Default for Settings {
    fn default() -> Self {
        let env = match env::var("ENV") {
            Ok(e) => e,
            Err(_) => {
                log::warn!("no ENV set, use default: 'dev'");
                String::from("dev")
            }
        };

        let file_path: String = format!("config_{}.toml", env);

        let mut file = match File::open(file_path.as_str()) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("no such file {}, use builtin defaults, exception: {}", file_path.as_str(), e);
                return Settings::builtin();
            }
        };

        let mut str_val = String::new();

        match file.read_to_string(&mut str_val) {
            Ok(s) => s,
            Err(e) => panic!("cannot read config file: {}", e)
        };

        toml::from_str(&str_val).expect("config file format invalid")
    }
}

impl Settings {
    pub fn get<'a>() -> &'a Self {
        // 给静态变量延迟赋值的宏
        lazy_static! {
            static ref CACHE: Settings = Settings::default();
        }
        &CACHE
    }

    /// 无配置文件时的内置默认配置
    fn builtin() -> Self {
        Settings {
            meta: Meta {
                application_name: String::from("topo-view"),
            },
            env: Env {
                debug: true,
                env: String::from("dev"),
                log_level: String::from("info"),
            },
            mqtt: Mqtt {
                endpoint: String::new(),
                host: String::from("127.0.0.1"),
                port: default_port(),
                secure: false,
                username: String::new(),
                password: String::new(),
                client_id_prefix: default_client_id_prefix(),
                topics: Vec::new(),
            },
        }
    }
}
