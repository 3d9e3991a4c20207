use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
#[cfg(test)]
use mockall::automock;

/// エクスポートしたデータをファイルとして保存するためのtrait。
#[cfg_attr(test, automock)]
pub trait FileSaver {
    /// データを指定したファイル名で保存し、保存先のパスを返す。
    ///
    /// # Arguments
    ///
    /// * `file_name` - 拡張子を含むファイル名
    /// * `payload` - 保存するデータ
    fn save(&self, file_name: &str, payload: &[u8]) -> Result<PathBuf>;
}

/// 指定したディレクトリにファイルを書き出す。
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    /// 新しい`DirectorySaver`を返す。
    ///
    /// # Arguments
    ///
    /// * `dir` - 保存先のディレクトリ。存在しない場合は保存時に作成する。
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, file_name: &str, payload: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;
        let path = self.dir.join(file_name);
        fs::write(&path, payload)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        info!("Saved {} bytes to {}", payload.len(), path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{DirectorySaver, FileSaver};

    #[test]
    fn test_save_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("exports");
        let saver = DirectorySaver::new(&dir);

        let path = saver.save("time-export_1-15-2024.json", b"{}").unwrap();

        assert_eq!(path, dir.join("time-export_1-15-2024.json"));
        assert_eq!(fs::read(&path).unwrap(), b"{}");
    }

    /// 保存先がファイルの場合はエラーになることを確認する。
    #[test]
    fn test_save_fails_when_dir_is_file() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let saver = DirectorySaver::new(&blocker);

        let result = saver.save("out.json", b"{}");

        assert!(result.is_err());
    }
}
