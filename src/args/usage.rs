use crate::models::{ConversionArgs, OutputFormat};
use std::io::{self, Write};

const USAGE: &str = "\
cgf-converter [-usage] | <.cgf file> [-outputdir <output dir>] [-objectdir <ObjectDir>] [-obj] [-blend] [-dae] [-smooth] [-throw]

-usage:           Prints out the usage statement

<.cgf file>:      Mandatory.  The name of the .cgf, .cga or .skin file to process.
                  Wildcards (* and ?) in the file name search all subdirectories.
-infile, -inputfile:
                  Same as <.cgf file>
-out, -outdir, -outputdir:
                  The directory to write the output to.  Default is the input file's directory
-noconflict, -noconflicts:
                  Use non-conflicting naming scheme (<cgf File>_out.obj)
-allowconflict, -allowconflicts:
                  Allows conflicts in .mtl file name
-datadir, -objectdir:
                  The name where the base Objects directory is located.  Used to read mtl file
                  Defaults to current directory.
-obj, -object, -wavefront:
                  Export Wavefront format files
-blend, -blender: Export Blender format files (Not Implemented)
-dae, -collada:   Export Collada format files (Default if no format is given)
-fbx:             Export FBX format files (Not Implemented)
-cry, -crytek:    Export CryTek format files
-smooth:          Smooth Faces
-group:           Group meshes into single model
-tif, -tiff:      Use .tif texture paths instead of .dds
-skipshield, -skipshields:
                  Skip nodes containing $shield
-skipproxy:       Skip nodes containing $proxy
-verbose:         Log debug output

-throw:           Throw Exceptions to installed debugger
";

/// Write the usage statement
pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", USAGE)?;
    writeln!(out)
}

/// Write a summary of the resolved arguments
pub fn write_args<W: Write>(args: &ConversionArgs, out: &mut W) -> io::Result<()> {
    let formats = args.output_formats();

    writeln!(out)?;
    writeln!(out, "*** Submitted args ***")?;
    for file in args.input_files() {
        writeln!(out, "    Input file:             {}", file)?;
    }
    if let Some(dir) = args.data_dir() {
        writeln!(out, "    Object dir:             {}", dir)?;
    }
    if let Some(dir) = args.output_dir() {
        writeln!(out, "    Output dir:             {}", dir)?;
    }
    writeln!(out, "    Smooth Faces:           {}", args.smooth())?;
    writeln!(out, "    Group Meshes:           {}", args.group_meshes())?;
    for format in [
        OutputFormat::Wavefront,
        OutputFormat::Blender,
        OutputFormat::Collada,
        OutputFormat::Fbx,
        OutputFormat::CryTek,
    ] {
        let label = format!("Output to {}:", format.extensions());
        writeln!(out, "    {:<24}{}", label, formats.contains(format))?;
    }
    writeln!(out)
}
