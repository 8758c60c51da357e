//! Project sources shared across tests.

pub const SDK_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFrameworks>net472;net8.0</TargetFrameworks>
    <Configurations>Debug;Release</Configurations>
    <Platforms>AnyCPU;x64</Platforms>
  </PropertyGroup>
  <ItemGroup>
    <Compile Include="a.cs" />
  </ItemGroup>
  <Target Name="Build">
    <Message Text="hi" />
  </Target>
</Project>"#;

/// A project with a `|` cursor in its `Platform` value.
pub const PLATFORM_VALUE: &str = r#"<Project>
  <PropertyGroup>
    <Platforms>AnyCPU;x64</Platforms>
    <Platform>A|</Platform>
  </PropertyGroup>
</Project>"#;
