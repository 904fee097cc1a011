use crate::error::{CliError, Result};
use foldgroup::core::models::atom::Atom;
use foldgroup::core::models::provider::StructureProvider;
use foldgroup::core::models::structure::StructureModel;
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a PDB-format structure file into a [`StructureModel`].
///
/// This is a deliberately minimal reader for prediction output: fixed-column
/// `ATOM`/`HETATM` records, first model only. It is the Structure Provider
/// collaborator at the CLI boundary; the core engine never parses files.
pub fn read_structure(path: &Path) -> Result<StructureModel> {
    let file = File::open(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    read_from(BufReader::new(file), path)
}

fn read_from(reader: impl BufRead, path: &Path) -> Result<StructureModel> {
    let mut model = StructureModel::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if line.starts_with("ENDMDL") {
            break;
        }
        if !(line.starts_with("ATOM") || line.starts_with("HETATM")) {
            continue;
        }

        let atom_name = column(&line, 12, 16).trim();
        let residue_name = column(&line, 17, 20).trim();
        let chain_id = line.chars().nth(21).unwrap_or(' ');
        let residue_number: isize = column(&line, 22, 26).trim().parse().map_err(|_| {
            parse_error(path, index, "invalid residue sequence number")
        })?;
        let x = parse_coordinate(&line, 30, 38, path, index)?;
        let y = parse_coordinate(&line, 38, 46, path, index)?;
        let z = parse_coordinate(&line, 46, 54, path, index)?;

        let chain = model.add_chain(chain_id);
        let residue = model
            .add_residue(chain, residue_number, residue_name)
            .ok_or_else(|| parse_error(path, index, "could not place residue"))?;
        model.add_atom_to_residue(residue, Atom::new(atom_name, residue, Point3::new(x, y, z)));
    }

    if model.residue_count() == 0 {
        return Err(CliError::FileParsing {
            path: path.to_path_buf(),
            source: anyhow::anyhow!("no ATOM records found"),
        });
    }
    Ok(model)
}

fn column(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("")
}

fn parse_coordinate(
    line: &str,
    start: usize,
    end: usize,
    path: &Path,
    index: usize,
) -> Result<f64> {
    column(line, start, end)
        .trim()
        .parse()
        .map_err(|_| parse_error(path, index, "invalid coordinate"))
}

fn parse_error(path: &Path, index: usize, message: &str) -> CliError {
    CliError::FileParsing {
        path: path.to_path_buf(),
        source: anyhow::anyhow!("line {}: {}", index + 1, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
HEADER    DESIGNED BINDER
ATOM      1  N   ALA A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  ALA A   1       1.458   0.000   0.000  1.00  0.00           C
ATOM      3  CA  GLY A   2       3.800   1.000   0.000  1.00  0.00           C
ATOM      4  CA  LYS B  10       3.000   0.000   0.000  1.00  0.00           C
TER
END
";

    fn parse(text: &str) -> Result<StructureModel> {
        read_from(Cursor::new(text), Path::new("test.pdb"))
    }

    #[test]
    fn parses_atoms_chains_and_residues() {
        let model = parse(SAMPLE).unwrap();
        assert_eq!(model.chain_ids(), vec!['A', 'B']);
        assert_eq!(model.residue_count(), 3);
        assert_eq!(model.atom_count(), 4);

        let seq = model.sequence_residues();
        let codes: String = seq.iter().map(|r| r.code).collect();
        assert_eq!(codes, "AGK");
        assert_eq!(seq[2].residue_id, 10);
    }

    #[test]
    fn coordinates_are_read_from_fixed_columns() {
        let model = parse(SAMPLE).unwrap();
        let sites = model.atom_sites();
        assert_eq!(sites[1].position, Point3::new(1.458, 0.0, 0.0));
        assert_eq!(sites[3].chain_id, 'B');
    }

    #[test]
    fn stops_at_the_first_model() {
        let text = format!("{}ENDMDL\nATOM      9  CA  TRP C  99       0.000   0.000   0.000\n", SAMPLE);
        let model = parse(&text).unwrap();
        assert_eq!(model.chain_ids(), vec!['A', 'B']);
    }

    #[test]
    fn hetatm_records_are_kept() {
        let text = "\
HETATM    1 SE   MSE A   1       0.000   0.000   0.000
";
        let model = parse(text).unwrap();
        assert_eq!(model.residue_count(), 1);
        assert_eq!(model.sequence_residues()[0].code, 'M');
    }

    #[test]
    fn malformed_coordinate_is_a_parse_error() {
        let text = "\
ATOM      1  CA  ALA A   1       x.xxx   0.000   0.000
";
        assert!(matches!(parse(text), Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(parse("TITLE empty\n"), Err(CliError::FileParsing { .. })));
    }
}
