// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation catalog for lingo-bootstrap.
//!
//! Embeds all user-facing installer strings for the supported display
//! languages as a compile-time static table. Lookup is a linear scan, which
//! is fine for a few dozen keys printed once per run.
//!
//! ## Adding a new language
//!
//! 1. Add a variant to [`Lang`]
//! 2. Add arms to `Lang::code()`, `Lang::from_code()` and `Lang::native_name()`
//! 3. Create a `const XX: &[(&str, &str)]` table below
//! 4. Add `Lang::Xx => XX` to the match in `catalog_for()`
//!
//! ## Adding a new key
//!
//! 1. Add the English entry to `EN`
//! 2. Add translations to every other table (missing keys fall back to English)
//!
//! Templates use `{}` placeholders, filled left to right by [`fill`].

use serde::{Deserialize, Serialize};

/// Display languages the installer can talk in.
///
/// Codes match the `display_language` values the application itself writes
/// to `config.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    En,
    ZhCn,
    Es,
    Fr,
    Ja,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::ZhCn => "zh-CN",
            Lang::Es => "es",
            Lang::Fr => "fr",
            Lang::Ja => "ja",
        }
    }

    /// Parse a persisted `display_language` value.
    ///
    /// Returns `None` for languages without a catalog.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "zh-CN" | "zh" => Some(Lang::ZhCn),
            "es" => Some(Lang::Es),
            "fr" => Some(Lang::Fr),
            "ja" => Some(Lang::Ja),
            _ => None,
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::ZhCn => "简体中文",
            Lang::Es => "Español",
            Lang::Fr => "Français",
            Lang::Ja => "日本語",
        }
    }

    /// All supported languages, in display order.
    pub fn all() -> &'static [Lang] {
        &[Lang::En, Lang::ZhCn, Lang::Es, Lang::Fr, Lang::Ja]
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ─── Translation Lookup ─────────────────────────────────────────────

/// Look up a translation key in the specified language.
///
/// Falls back to English if the key is not found in the requested language,
/// and to the empty string if English lacks it too.
///
/// # Examples
///
/// ```
/// use lingo_bootstrap::i18n::{t, Lang};
/// assert_eq!(t(Lang::En, "install.start"), "🚀 Starting Installation");
/// assert_eq!(t(Lang::ZhCn, "install.start"), "🚀 开始安装");
/// ```
pub fn t(lang: Lang, key: &str) -> &'static str {
    if let Some(value) = lookup(catalog_for(lang), key) {
        return value;
    }
    if lang != Lang::En {
        if let Some(value) = lookup(EN, key) {
            return value;
        }
    }
    ""
}

/// Like [`t`], but returns the key itself when nothing matches.
pub fn t_or_key<'a>(lang: Lang, key: &'a str) -> &'a str {
    let result = t(lang, key);
    if result.is_empty() {
        key
    } else {
        result
    }
}

/// Substitute `{}` placeholders in order. Surplus placeholders stay as-is.
pub fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

fn lookup(catalog: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    catalog.iter().find(|(k, _)| *k == key).map(|&(_, v)| v)
}

fn catalog_for(lang: Lang) -> &'static [(&'static str, &'static str)] {
    match lang {
        Lang::En => EN,
        Lang::ZhCn => ZH_CN,
        Lang::Es => ES,
        Lang::Fr => FR,
        Lang::Ja => JA,
    }
}

// ─── English (source language — all keys defined here) ──────────────

const EN: &[(&str, &str)] = &[
    ("install.start", "🚀 Starting Installation"),
    ("mirror.default", "🌍 Using international PyPI mirrors (default)"),
    ("mirror.custom", "🌍 Using PyPI mirror: {}"),
    // Accelerator probe
    ("gpu.detected", "Detected NVIDIA GPU(s)"),
    ("gpu.none", "No NVIDIA GPU detected"),
    ("gpu.driver_missing", "No NVIDIA GPU detected or NVIDIA drivers not properly installed"),
    // ML runtime
    ("runtime.cuda", "🎮 NVIDIA GPU detected, installing CUDA version of PyTorch..."),
    (
        "runtime.cpu_macos",
        "🍎 MacOS detected, installing CPU version of PyTorch... Note: it might be slow during whisperX transcription.",
    ),
    (
        "runtime.cpu_no_gpu",
        "💻 No NVIDIA GPU detected, installing CPU version of PyTorch... Note: it might be slow during whisperX transcription.",
    ),
    ("runtime.failed", "Failed to install PyTorch"),
    // Fonts
    ("fonts.container", "🐳 Container environment detected, skipping system font installation"),
    (
        "fonts.unknown_distro",
        "Warning: Unrecognized Linux distribution, skipping Noto fonts installation",
    ),
    ("fonts.installed", "✅ Successfully installed Noto fonts using {}"),
    ("fonts.failed", "⚠️ Could not install Noto fonts with {}, continuing without fonts"),
    // Project
    ("project.installing", "Installing project in editable mode using `pip install -e .`"),
    ("project.failed", "Failed to install project"),
    // Media binary
    ("media.found", "✅ FFmpeg is already installed"),
    ("media.missing", "⚠️ FFmpeg not found in PATH"),
    ("media.install_using", "🛠️ Install using:"),
    ("media.note", "💡 Note:"),
    (
        "media.continuing",
        "🔄 Continuing installation, but FFmpeg may be required for video processing",
    ),
    ("media.note_windows", "Install Chocolatey first (https://chocolatey.org/)"),
    ("media.note_macos", "Install Homebrew first (https://brew.sh/)"),
    ("media.note_linux", "Use your distribution's package manager"),
    (
        "media.final_warning",
        "⚠️ FFmpeg not found, but installation will continue. Video processing may not work properly.",
    ),
    ("media.required", "FFmpeg is required but was not found in PATH"),
    // Completion
    ("done.title", "Installation completed"),
    ("done.run_command", "Now I will run this command to start the application:"),
    ("done.first_start", "Note: First startup may take up to 1 minute"),
    ("trouble.title", "If the application fails to start:"),
    ("trouble.network", "Check your network connection"),
    ("trouble.rerun", "Re-run the installer: {}"),
    // Launch
    ("launch.managed", "🏖️ Modal/Container environment detected, skipping automatic startup"),
    (
        "launch.managed_done",
        "✅ Installation completed successfully! Streamlit will be started by the container.",
    ),
    ("launch.disabled", "Automatic startup disabled, start the application with: {}"),
    ("launch.failed", "⚠️ Could not start the application: {}"),
    // Language command
    ("lang.current", "Display language: {}"),
    ("lang.updated", "Display language set to {}"),
];

// ─── Simplified Chinese ─────────────────────────────────────────────

const ZH_CN: &[(&str, &str)] = &[
    ("install.start", "🚀 开始安装"),
    ("mirror.default", "🌍 使用国际 PyPI 镜像（默认）"),
    ("mirror.custom", "🌍 使用 PyPI 镜像：{}"),
    ("gpu.detected", "检测到 NVIDIA 显卡"),
    ("gpu.none", "未检测到 NVIDIA 显卡"),
    ("gpu.driver_missing", "未检测到 NVIDIA 显卡或 NVIDIA 驱动未正确安装"),
    ("runtime.cuda", "🎮 检测到 NVIDIA 显卡，正在安装 CUDA 版本的 PyTorch..."),
    ("runtime.cpu_macos", "🍎 检测到 MacOS，正在安装 CPU 版本的 PyTorch... 注意：whisperX 转录可能较慢。"),
    ("runtime.cpu_no_gpu", "💻 未检测到 NVIDIA 显卡，正在安装 CPU 版本的 PyTorch... 注意：whisperX 转录可能较慢。"),
    ("runtime.failed", "PyTorch 安装失败"),
    ("fonts.container", "🐳 检测到容器环境，跳过系统字体安装"),
    ("fonts.unknown_distro", "警告：无法识别的 Linux 发行版，跳过 Noto 字体安装"),
    ("fonts.installed", "✅ 已使用 {} 成功安装 Noto 字体"),
    ("fonts.failed", "⚠️ 无法使用 {} 安装 Noto 字体，将在没有字体的情况下继续"),
    ("project.installing", "正在使用 `pip install -e .` 以可编辑模式安装项目"),
    ("project.failed", "项目安装失败"),
    ("media.found", "✅ FFmpeg 已安装"),
    ("media.missing", "⚠️ 在 PATH 中未找到 FFmpeg"),
    ("media.install_using", "🛠️ 安装方式："),
    ("media.note", "💡 提示："),
    ("media.continuing", "🔄 继续安装，但视频处理可能需要 FFmpeg"),
    ("media.note_windows", "请先安装 Chocolatey (https://chocolatey.org/)"),
    ("media.note_macos", "请先安装 Homebrew (https://brew.sh/)"),
    ("media.note_linux", "请使用发行版自带的包管理器"),
    ("media.final_warning", "⚠️ 未找到 FFmpeg，安装将继续，但视频处理可能无法正常工作。"),
    ("media.required", "需要 FFmpeg，但在 PATH 中未找到"),
    ("done.title", "安装完成"),
    ("done.run_command", "现在将运行以下命令启动应用："),
    ("done.first_start", "注意：首次启动可能需要 1 分钟"),
    ("trouble.title", "如果应用启动失败："),
    ("trouble.network", "检查网络连接"),
    ("trouble.rerun", "重新运行安装程序：{}"),
    ("launch.managed", "🏖️ 检测到 Modal/容器环境，跳过自动启动"),
    ("launch.managed_done", "✅ 安装成功！Streamlit 将由容器启动。"),
    ("launch.disabled", "已禁用自动启动，请手动运行：{}"),
    ("launch.failed", "⚠️ 无法启动应用：{}"),
    ("lang.current", "显示语言：{}"),
    ("lang.updated", "显示语言已设置为 {}"),
];

// ─── Spanish ────────────────────────────────────────────────────────

const ES: &[(&str, &str)] = &[
    ("install.start", "🚀 Iniciando la instalación"),
    ("mirror.default", "🌍 Usando los espejos internacionales de PyPI (predeterminado)"),
    ("mirror.custom", "🌍 Usando el espejo de PyPI: {}"),
    ("gpu.detected", "GPU(s) NVIDIA detectada(s)"),
    ("gpu.none", "No se detectó ninguna GPU NVIDIA"),
    (
        "gpu.driver_missing",
        "No se detectó ninguna GPU NVIDIA o los controladores NVIDIA no están bien instalados",
    ),
    ("runtime.cuda", "🎮 GPU NVIDIA detectada, instalando la versión CUDA de PyTorch..."),
    (
        "runtime.cpu_macos",
        "🍎 MacOS detectado, instalando la versión CPU de PyTorch... Nota: la transcripción con whisperX puede ser lenta.",
    ),
    (
        "runtime.cpu_no_gpu",
        "💻 Sin GPU NVIDIA, instalando la versión CPU de PyTorch... Nota: la transcripción con whisperX puede ser lenta.",
    ),
    ("runtime.failed", "Error al instalar PyTorch"),
    (
        "fonts.container",
        "🐳 Entorno de contenedor detectado, se omite la instalación de fuentes del sistema",
    ),
    (
        "fonts.unknown_distro",
        "Aviso: distribución de Linux no reconocida, se omite la instalación de fuentes Noto",
    ),
    ("fonts.installed", "✅ Fuentes Noto instaladas correctamente con {}"),
    ("fonts.failed", "⚠️ No se pudieron instalar las fuentes Noto con {}, se continúa sin ellas"),
    ("project.installing", "Instalando el proyecto en modo editable con `pip install -e .`"),
    ("project.failed", "Error al instalar el proyecto"),
    ("media.found", "✅ FFmpeg ya está instalado"),
    ("media.missing", "⚠️ FFmpeg no se encuentra en el PATH"),
    ("media.install_using", "🛠️ Instálalo con:"),
    ("media.note", "💡 Nota:"),
    (
        "media.continuing",
        "🔄 La instalación continúa, pero FFmpeg puede ser necesario para procesar vídeo",
    ),
    ("media.note_windows", "Instala primero Chocolatey (https://chocolatey.org/)"),
    ("media.note_macos", "Instala primero Homebrew (https://brew.sh/)"),
    ("media.note_linux", "Usa el gestor de paquetes de tu distribución"),
    (
        "media.final_warning",
        "⚠️ FFmpeg no encontrado, la instalación continuará. El procesamiento de vídeo puede no funcionar.",
    ),
    ("media.required", "FFmpeg es obligatorio pero no se encuentra en el PATH"),
    ("done.title", "Instalación completada"),
    ("done.run_command", "Ahora ejecutaré este comando para iniciar la aplicación:"),
    ("done.first_start", "Nota: el primer arranque puede tardar hasta 1 minuto"),
    ("trouble.title", "Si la aplicación no arranca:"),
    ("trouble.network", "Comprueba tu conexión de red"),
    ("trouble.rerun", "Vuelve a ejecutar el instalador: {}"),
    ("launch.managed", "🏖️ Entorno Modal/contenedor detectado, se omite el arranque automático"),
    ("launch.managed_done", "✅ ¡Instalación completada! El contenedor iniciará Streamlit."),
    ("launch.disabled", "Arranque automático desactivado, inicia la aplicación con: {}"),
    ("launch.failed", "⚠️ No se pudo iniciar la aplicación: {}"),
    ("lang.current", "Idioma de la interfaz: {}"),
    ("lang.updated", "Idioma de la interfaz cambiado a {}"),
];

// ─── French ─────────────────────────────────────────────────────────

const FR: &[(&str, &str)] = &[
    ("install.start", "🚀 Début de l'installation"),
    ("mirror.default", "🌍 Utilisation des miroirs PyPI internationaux (par défaut)"),
    ("mirror.custom", "🌍 Utilisation du miroir PyPI : {}"),
    ("gpu.detected", "GPU NVIDIA détecté(s)"),
    ("gpu.none", "Aucun GPU NVIDIA détecté"),
    ("gpu.driver_missing", "Aucun GPU NVIDIA détecté ou pilotes NVIDIA mal installés"),
    ("runtime.cuda", "🎮 GPU NVIDIA détecté, installation de la version CUDA de PyTorch..."),
    (
        "runtime.cpu_macos",
        "🍎 MacOS détecté, installation de la version CPU de PyTorch... Remarque : la transcription whisperX peut être lente.",
    ),
    (
        "runtime.cpu_no_gpu",
        "💻 Aucun GPU NVIDIA, installation de la version CPU de PyTorch... Remarque : la transcription whisperX peut être lente.",
    ),
    ("runtime.failed", "Échec de l'installation de PyTorch"),
    ("fonts.container", "🐳 Conteneur détecté, installation des polices système ignorée"),
    (
        "fonts.unknown_distro",
        "Attention : distribution Linux non reconnue, installation des polices Noto ignorée",
    ),
    ("fonts.installed", "✅ Polices Noto installées avec {}"),
    ("fonts.failed", "⚠️ Impossible d'installer les polices Noto avec {}, on continue sans"),
    ("project.installing", "Installation du projet en mode éditable avec `pip install -e .`"),
    ("project.failed", "Échec de l'installation du projet"),
    ("media.found", "✅ FFmpeg est déjà installé"),
    ("media.missing", "⚠️ FFmpeg introuvable dans le PATH"),
    ("media.install_using", "🛠️ Installez-le avec :"),
    ("media.note", "💡 Remarque :"),
    (
        "media.continuing",
        "🔄 L'installation continue, mais FFmpeg peut être nécessaire au traitement vidéo",
    ),
    ("media.note_windows", "Installez d'abord Chocolatey (https://chocolatey.org/)"),
    ("media.note_macos", "Installez d'abord Homebrew (https://brew.sh/)"),
    ("media.note_linux", "Utilisez le gestionnaire de paquets de votre distribution"),
    (
        "media.final_warning",
        "⚠️ FFmpeg introuvable, l'installation continue. Le traitement vidéo risque de ne pas fonctionner.",
    ),
    ("media.required", "FFmpeg est requis mais introuvable dans le PATH"),
    ("done.title", "Installation terminée"),
    ("done.run_command", "Je vais maintenant lancer l'application avec cette commande :"),
    ("done.first_start", "Remarque : le premier démarrage peut prendre jusqu'à 1 minute"),
    ("trouble.title", "Si l'application ne démarre pas :"),
    ("trouble.network", "Vérifiez votre connexion réseau"),
    ("trouble.rerun", "Relancez l'installateur : {}"),
    ("launch.managed", "🏖️ Environnement Modal/conteneur détecté, démarrage automatique ignoré"),
    ("launch.managed_done", "✅ Installation réussie ! Streamlit sera lancé par le conteneur."),
    ("launch.disabled", "Démarrage automatique désactivé, lancez l'application avec : {}"),
    ("launch.failed", "⚠️ Impossible de démarrer l'application : {}"),
    ("lang.current", "Langue d'affichage : {}"),
    ("lang.updated", "Langue d'affichage définie sur {}"),
];

// ─── Japanese ───────────────────────────────────────────────────────

const JA: &[(&str, &str)] = &[
    ("install.start", "🚀 インストールを開始します"),
    ("mirror.default", "🌍 国際 PyPI ミラーを使用します（デフォルト）"),
    ("mirror.custom", "🌍 PyPI ミラーを使用します：{}"),
    ("gpu.detected", "NVIDIA GPU を検出しました"),
    ("gpu.none", "NVIDIA GPU が見つかりません"),
    ("gpu.driver_missing", "NVIDIA GPU が見つからないか、NVIDIA ドライバが正しくインストールされていません"),
    ("runtime.cuda", "🎮 NVIDIA GPU を検出しました。CUDA 版 PyTorch をインストールしています..."),
    (
        "runtime.cpu_macos",
        "🍎 MacOS を検出しました。CPU 版 PyTorch をインストールしています... 注意：whisperX の文字起こしは遅くなる場合があります。",
    ),
    (
        "runtime.cpu_no_gpu",
        "💻 NVIDIA GPU がありません。CPU 版 PyTorch をインストールしています... 注意：whisperX の文字起こしは遅くなる場合があります。",
    ),
    ("runtime.failed", "PyTorch のインストールに失敗しました"),
    ("fonts.container", "🐳 コンテナ環境を検出しました。システムフォントのインストールをスキップします"),
    ("fonts.unknown_distro", "警告：不明な Linux ディストリビューションのため Noto フォントのインストールをスキップします"),
    ("fonts.installed", "✅ {} で Noto フォントをインストールしました"),
    ("fonts.failed", "⚠️ {} で Noto フォントをインストールできませんでした。フォントなしで続行します"),
    ("project.installing", "`pip install -e .` で編集可能モードのプロジェクトをインストールしています"),
    ("project.failed", "プロジェクトのインストールに失敗しました"),
    ("media.found", "✅ FFmpeg はインストール済みです"),
    ("media.missing", "⚠️ PATH に FFmpeg が見つかりません"),
    ("media.install_using", "🛠️ インストール方法："),
    ("media.note", "💡 注意："),
    ("media.continuing", "🔄 インストールを続行しますが、動画処理には FFmpeg が必要な場合があります"),
    ("media.note_windows", "先に Chocolatey をインストールしてください (https://chocolatey.org/)"),
    ("media.note_macos", "先に Homebrew をインストールしてください (https://brew.sh/)"),
    ("media.note_linux", "ディストリビューションのパッケージマネージャを使用してください"),
    ("media.final_warning", "⚠️ FFmpeg が見つかりませんがインストールを続行します。動画処理が正しく動作しない可能性があります。"),
    ("media.required", "FFmpeg が必要ですが PATH に見つかりません"),
    ("done.title", "インストールが完了しました"),
    ("done.run_command", "次のコマンドでアプリケーションを起動します："),
    ("done.first_start", "注意：初回起動には最大 1 分かかる場合があります"),
    ("trouble.title", "アプリケーションが起動しない場合："),
    ("trouble.network", "ネットワーク接続を確認してください"),
    ("trouble.rerun", "インストーラを再実行してください：{}"),
    ("launch.managed", "🏖️ Modal/コンテナ環境を検出しました。自動起動をスキップします"),
    ("launch.managed_done", "✅ インストールが完了しました！Streamlit はコンテナによって起動されます。"),
    ("launch.disabled", "自動起動は無効です。次のコマンドで起動してください：{}"),
    ("launch.failed", "⚠️ アプリケーションを起動できませんでした：{}"),
    ("lang.current", "表示言語：{}"),
    ("lang.updated", "表示言語を {} に設定しました"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_keys_all_resolve() {
        for &(key, _) in EN {
            let result = t(Lang::En, key);
            assert!(!result.is_empty(), "EN key '{}' should resolve", key);
        }
    }

    #[test]
    fn chinese_is_served_from_its_own_table() {
        assert_eq!(t(Lang::ZhCn, "done.title"), "安装完成");
        assert_ne!(t(Lang::ZhCn, "media.found"), t(Lang::En, "media.found"));
    }

    #[test]
    fn unknown_key_returns_empty() {
        assert_eq!(t(Lang::Fr, "nonexistent.key"), "");
        assert_eq!(t_or_key(Lang::Fr, "nonexistent.key"), "nonexistent.key");
    }

    #[test]
    fn lang_roundtrip() {
        for lang in Lang::all() {
            assert_eq!(Lang::from_code(lang.code()), Some(*lang));
        }
        assert_eq!(Lang::from_code("zh"), Some(Lang::ZhCn));
        assert_eq!(Lang::from_code("zh-HK"), None);
    }

    #[test]
    fn all_catalogs_define_every_english_key() {
        for lang in Lang::all() {
            let table = catalog_for(*lang);
            assert_eq!(table.len(), EN.len(), "{:?} catalog key count mismatch", lang);
            for &(key, _) in EN {
                assert!(lookup(table, key).is_some(), "{:?} is missing '{}'", lang, key);
            }
        }
    }

    #[test]
    fn placeholders_keep_their_count() {
        for lang in Lang::all() {
            for &(key, en) in EN {
                let translated = t(*lang, key);
                assert_eq!(
                    translated.matches("{}").count(),
                    en.matches("{}").count(),
                    "{:?} '{}' placeholder mismatch",
                    lang,
                    key
                );
            }
        }
    }

    #[test]
    fn fill_substitutes_in_order() {
        assert_eq!(fill("{} and {}", &["apt-get", "yum"]), "apt-get and yum");
        assert_eq!(fill("{} and {}", &["apt-get"]), "apt-get and {}");
        assert_eq!(fill("no placeholders", &["x"]), "no placeholders");
    }
}
